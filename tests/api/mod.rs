mod health_tests;
mod hub_tests;
mod publish_tests;
mod ws_tests;
