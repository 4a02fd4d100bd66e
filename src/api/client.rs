//! API client for making requests to Bilibili pages

use reqwest::{Client, RequestBuilder};

pub struct ApiClient {
    pub client: Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36",
            )
            .header("Referer", "https://www.bilibili.com/")
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
