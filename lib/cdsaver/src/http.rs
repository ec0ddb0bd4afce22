use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Sends a request and decodes a JSON body from a successful answer.
pub(crate) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    debug!("Response status: {}", status);
    if !status.is_success() {
        return Err(api_error(response).await);
    }

    let text = response.text().await?;
    decode_body(&text)
}

fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Sends a request whose answer carries no body of interest.
///
/// `accept` decides which statuses count as success.
pub(crate) async fn send_expecting(
    request: RequestBuilder,
    accept: impl Fn(StatusCode) -> bool,
) -> Result<()> {
    let response = request.send().await?;
    let status = response.status();
    debug!("Response status: {}", status);
    if accept(status) {
        Ok(())
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error body".to_string());
    Error::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Page {
        total: u32,
    }

    #[test]
    fn decodes_body() {
        let page: Page = decode_body(r#"{"total": 3}"#).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let result = decode_body::<Page>("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(Error::Json(_))));
        assert_eq!(result.unwrap_err().status(), None);
    }
}
