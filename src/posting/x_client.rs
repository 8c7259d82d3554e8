//! Blocking HTTP `Poster` for the X (Twitter) v2 API with a user-context bearer token.

use crate::models::identity::Identity;
use crate::posting::compose::fit_text;
use crate::posting::{MediaHandle, PostError, PostResult, Poster};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

pub struct XClient {
    client: Client,
    base: String,
    token: Zeroizing<String>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct TweetData {
    id: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MediaData {
    id: String,
}

#[derive(Deserialize)]
struct UserData {
    id: String,
    name: String,
    username: String,
}

impl XClient {
    pub fn new(base: impl Into<String>, token: impl Into<String>) -> Result<Self, PostError> {
        let client = Client::builder()
            .user_agent(concat!("tokenshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PostError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
            token: Zeroizing::new(token.into()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PostError> {
        let response = request
            .bearer_auth(self.token.as_str())
            .send()
            .map_err(|e| PostError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| PostError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(PostError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| PostError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    fn create_tweet(&self, text: &str, media: &[MediaHandle]) -> Result<PostResult, PostError> {
        let text = fit_text(text);
        let mut body = json!({ "text": text });
        if !media.is_empty() {
            let ids: Vec<&str> = media.iter().map(|m| m.0.as_str()).collect();
            body["media"] = json!({ "media_ids": ids });
        }
        debug!(chars = text.chars().count(), media = media.len(), "creating post");
        let data: TweetData = self.send(self.client.post(self.url("/2/tweets")).json(&body))?;
        Ok(PostResult {
            id: data.id,
            text: data.text.unwrap_or_else(|| text.into_owned()),
        })
    }
}

impl Poster for XClient {
    fn post_text(&self, text: &str) -> Result<PostResult, PostError> {
        self.create_tweet(text, &[])
    }

    fn upload_media(&self, path: &Path) -> Result<MediaHandle, PostError> {
        if !path.is_file() {
            return Err(PostError::MediaNotFound(path.to_path_buf()));
        }
        let form = multipart::Form::new()
            .text("media_category", "tweet_image")
            .file("media", path)
            .map_err(|source| PostError::Media {
                path: path.to_path_buf(),
                source,
            })?;
        let data: MediaData =
            self.send(self.client.post(self.url("/2/media/upload")).multipart(form))?;
        debug!(path = %path.display(), media_id = %data.id, "media uploaded");
        Ok(MediaHandle(data.id))
    }

    fn post_with_media(&self, text: &str, media: &[MediaHandle]) -> Result<PostResult, PostError> {
        if media.len() > crate::constants::MAX_MEDIA_PER_POST {
            return Err(PostError::TooManyMedia {
                count: media.len(),
                max: crate::constants::MAX_MEDIA_PER_POST,
            });
        }
        self.create_tweet(text, media)
    }

    fn who_am_i(&self) -> Result<Identity, PostError> {
        let user: UserData = self.send(self.client.get(self.url("/2/users/me")))?;
        Ok(Identity {
            id: Some(user.id),
            name: user.name,
            username: Some(user.username),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_trailing_slash_trimmed() {
        let client = XClient::new("https://api.example.test/", "tok").unwrap();
        assert_eq!(client.url("/2/tweets"), "https://api.example.test/2/tweets");
    }

    #[test]
    fn test_too_many_media_rejected_before_request() {
        let client = XClient::new("http://127.0.0.1:9", "tok").unwrap();
        let media: Vec<_> = (0..5).map(|i| MediaHandle(i.to_string())).collect();
        assert!(matches!(
            client.post_with_media("x", &media),
            Err(PostError::TooManyMedia { count: 5, .. })
        ));
    }

    #[test]
    fn test_missing_media_rejected_before_request() {
        let client = XClient::new("http://127.0.0.1:9", "tok").unwrap();
        assert!(matches!(
            client.upload_media(Path::new("/definitely/not/here.png")),
            Err(PostError::MediaNotFound(_))
        ));
    }

    #[test]
    fn test_envelope_decoding() {
        let data: Envelope<UserData> =
            serde_json::from_str(r#"{"data":{"id":"9","name":"Bot","username":"bot"}}"#).unwrap();
        assert_eq!(data.data.username, "bot");
    }
}
