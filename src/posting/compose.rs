//! Draft preparation: length limit and attachment selection.

use crate::constants::{MAX_MEDIA_PER_POST, MAX_POST_CHARS, TRUNCATION_MARKER};
use crate::posting::{PostError, PostResult, Poster};
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::{info, warn};

/// Cut `text` to the post limit: first 277 characters plus `...`.
pub fn fit_text(text: &str) -> Cow<'_, str> {
    let count = text.chars().count();
    if count <= MAX_POST_CHARS {
        return Cow::Borrowed(text);
    }
    warn!(chars = count, max = MAX_POST_CHARS, "post too long, truncating");
    let keep = MAX_POST_CHARS - TRUNCATION_MARKER.chars().count();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    Cow::Owned(out)
}

/// A post ready to publish.
#[derive(Debug, Clone)]
pub struct Draft {
    pub text: String,
    pub media: Vec<PathBuf>,
}

impl Draft {
    /// Truncate the text and keep the first four attachments that exist.
    /// Missing files are skipped; it is an error only when attachments were
    /// requested and none of them is usable.
    pub fn new(text: &str, mut media: Vec<PathBuf>) -> Result<Self, PostError> {
        if media.len() > MAX_MEDIA_PER_POST {
            warn!(
                count = media.len(),
                max = MAX_MEDIA_PER_POST,
                "too many media attachments, keeping the first ones"
            );
            media.truncate(MAX_MEDIA_PER_POST);
        }
        let requested = media.len();
        media.retain(|path| {
            let usable = path.is_file();
            if !usable {
                warn!(path = %path.display(), "media file not found, skipping");
            }
            usable
        });
        if requested > 0 && media.is_empty() {
            return Err(PostError::NoUsableMedia { requested });
        }
        Ok(Self {
            text: fit_text(text).into_owned(),
            media,
        })
    }
}

/// Upload the draft's media, then post.
pub fn publish(poster: &dyn Poster, draft: &Draft) -> Result<PostResult, PostError> {
    if draft.media.is_empty() {
        let result = poster.post_text(&draft.text)?;
        info!(id = %result.id, "posted");
        return Ok(result);
    }
    let mut handles = Vec::with_capacity(draft.media.len());
    for path in &draft.media {
        info!(path = %path.display(), "uploading media");
        handles.push(poster.upload_media(path)?);
    }
    let result = poster.post_with_media(&draft.text, &handles)?;
    info!(id = %result.id, media = handles.len(), "posted with media");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::identity::Identity;
    use crate::posting::MediaHandle;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingPoster {
        calls: RefCell<Vec<String>>,
    }

    impl Poster for RecordingPoster {
        fn post_text(&self, text: &str) -> Result<PostResult, PostError> {
            self.calls.borrow_mut().push(format!("text:{}", text));
            Ok(PostResult {
                id: "1".into(),
                text: text.into(),
            })
        }

        fn upload_media(&self, path: &Path) -> Result<MediaHandle, PostError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.calls.borrow_mut().push(format!("upload:{}", name));
            Ok(MediaHandle(format!("m-{}", name)))
        }

        fn post_with_media(
            &self,
            text: &str,
            media: &[MediaHandle],
        ) -> Result<PostResult, PostError> {
            let ids: Vec<_> = media.iter().map(|m| m.0.as_str()).collect();
            self.calls
                .borrow_mut()
                .push(format!("media:{}:{}", text, ids.join(",")));
            Ok(PostResult {
                id: "2".into(),
                text: text.into(),
            })
        }

        fn who_am_i(&self) -> Result<Identity, PostError> {
            Ok(Identity {
                id: None,
                name: "bot".into(),
                username: Some("bot".into()),
            })
        }
    }

    #[test]
    fn test_fit_text_short_unchanged() {
        assert!(matches!(fit_text("hello"), Cow::Borrowed("hello")));
        let exact = "a".repeat(280);
        assert_eq!(fit_text(&exact), exact.as_str());
    }

    #[test]
    fn test_fit_text_truncates_to_limit() {
        let long = "b".repeat(300);
        let fitted = fit_text(&long);
        assert_eq!(fitted.chars().count(), 280);
        assert!(fitted.starts_with(&"b".repeat(277)));
        assert!(fitted.ends_with("..."));
    }

    #[test]
    fn test_fit_text_counts_chars() {
        let long = "é".repeat(281);
        let fitted = fit_text(&long);
        assert_eq!(fitted.chars().count(), 280);
    }

    fn images(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, b"png").unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_draft_keeps_first_four_media() {
        let dir = TempDir::new().unwrap();
        let media = images(&dir, &["0.png", "1.png", "2.png", "3.png", "4.png"]);
        let draft = Draft::new("x", media.clone()).unwrap();
        assert_eq!(draft.media, media[..4].to_vec());
    }

    #[test]
    fn test_draft_skips_missing_media() {
        let dir = TempDir::new().unwrap();
        let mut media = images(&dir, &["a.png"]);
        media.insert(0, dir.path().join("gone.png"));
        let draft = Draft::new("x", media).unwrap();
        assert_eq!(draft.media, vec![dir.path().join("a.png")]);
    }

    #[test]
    fn test_draft_without_usable_media_fails() {
        let dir = TempDir::new().unwrap();
        let missing = vec![dir.path().join("gone.png"), dir.path().join("also.png")];
        assert!(matches!(
            Draft::new("x", missing),
            Err(PostError::NoUsableMedia { requested: 2 })
        ));
    }

    #[test]
    fn test_publish_text_only() {
        let poster = RecordingPoster::default();
        let draft = Draft::new("hello", Vec::new()).unwrap();
        let result = publish(&poster, &draft).unwrap();
        assert_eq!(result.url(), "https://twitter.com/i/web/status/1");
        assert_eq!(poster.calls.borrow().as_slice(), ["text:hello".to_string()]);
    }

    #[test]
    fn test_publish_uploads_then_posts() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        std::fs::write(&a, b"png").unwrap();
        std::fs::write(&b, b"png").unwrap();
        let poster = RecordingPoster::default();
        let draft = Draft::new("pics", vec![a, b]).unwrap();
        publish(&poster, &draft).unwrap();
        assert_eq!(
            poster.calls.borrow().as_slice(),
            [
                "upload:a.png".to_string(),
                "upload:b.png".to_string(),
                "media:pics:m-a.png,m-b.png".to_string(),
            ]
        );
    }
}
