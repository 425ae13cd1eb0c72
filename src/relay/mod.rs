use reqwest::Client;
use tracing::{debug, warn};

/// Fire-and-forget forwarding of the raw signup field set to a third-party
/// form endpoint. Runs independently of the registry's own persistence; the
/// outcome is only logged.
pub struct FormRelay {
    client: Client,
    url: Option<String>,
}

impl FormRelay {
    pub fn new(url: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, url })
    }

    pub fn submit(&self, fields: Vec<(String, String)>) {
        let Some(url) = self.url.clone() else {
            debug!("form relay not configured, skipping submission");
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let result = client
                .post(&url)
                .header("Accept", "application/json")
                .form(&fields)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    debug!("form relay accepted submission");
                }
                Ok(response) => {
                    warn!("form relay rejected submission: HTTP {}", response.status());
                }
                Err(err) => {
                    warn!("form relay unreachable: {}", err);
                }
            }
        });
    }
}
