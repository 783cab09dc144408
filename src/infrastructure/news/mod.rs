mod newsapi_client;

pub use newsapi_client::NewsApiClient;
