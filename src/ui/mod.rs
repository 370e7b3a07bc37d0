pub mod cloud;
pub mod dashboard;
pub mod panels;
pub mod plot;

pub const TITLE: &str = "Twitter Sentiment Analysis: TNI Law Revision";
