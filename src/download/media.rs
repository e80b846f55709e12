//! Media file downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::CONTENT_TYPE;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

use crate::api::ParentzoneApi;
use crate::config::Config;
use crate::download::state::{DownloadOutcome, DownloadReport};
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, find_existing_file, media_filename, partial_filename};
use crate::logging::ARCHIVE_TARGET;
use crate::media::{extension_from_content_type, HasItemId, ItemId};
use crate::output::{clear_console, create_download_bar, print_info};

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Download every item that has no local file yet, in order.
///
/// Per-item failures are recorded in the report; only problems with
/// `target_dir` itself abort the pass.
pub async fn download_items<T: HasItemId>(
    api: &ParentzoneApi,
    config: &Config,
    items: &[T],
    target_dir: &Path,
) -> Result<DownloadReport> {
    ensure_dir(target_dir)?;

    let mut report = DownloadReport::default();
    let total = items.len();

    for (count, item) in items.iter().enumerate() {
        let id = item.item_id();

        let outcome = match find_existing_file(target_dir, id) {
            Ok(Some(path)) => DownloadOutcome::AlreadyPresent(path),
            Ok(None) => {
                print_info(&format!(
                    "Downloading media {} of {} id: {}",
                    count + 1,
                    total,
                    id
                ));
                let outcome = match download_item(api, config, id, target_dir).await {
                    Ok(path) => DownloadOutcome::Downloaded(path),
                    Err(e) => {
                        tracing::warn!("Failed to download media {}: {}", id, e);
                        DownloadOutcome::Failed(e.to_string())
                    }
                };
                sleep(config.options.download_delay()).await;
                outcome
            }
            Err(Error::InvalidFilename(reason)) => {
                tracing::warn!("Skipping media with unusable id {}: {}", id, reason);
                DownloadOutcome::Failed(reason)
            }
            Err(e) => return Err(e),
        };

        report.record(id, outcome);
        clear_console(config.options.clear_console);
    }

    Ok(report)
}

/// Fetch one item and write it as `{id}.{ext}` in `target_dir`.
pub async fn download_item(
    api: &ParentzoneApi,
    config: &Config,
    id: &ItemId,
    target_dir: &Path,
) -> Result<PathBuf> {
    let response = api.download_media(id).await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Download(format!("No Content-Type for media {}", id)))?;
    let extension = extension_from_content_type(content_type).ok_or_else(|| {
        Error::Download(format!(
            "Unusable Content-Type '{}' for media {}",
            content_type, id
        ))
    })?;

    let output_path = target_dir.join(media_filename(id, &extension)?);
    let partial_path = target_dir.join(partial_filename(id)?);

    let content_length = response.content_length();
    let progress = if config.options.show_progress
        && content_length.is_some_and(|l| l > PROGRESS_THRESHOLD)
    {
        Some(create_download_bar(
            content_length.unwrap_or(0),
            &id.to_string(),
        ))
    } else {
        None
    };

    // Stream to a hidden file so an interrupted download never counts as present
    let finished = match write_body(response, &partial_path, progress.as_ref()).await {
        Ok(()) => tokio::fs::rename(&partial_path, &output_path)
            .await
            .map_err(Error::from),
        Err(e) => Err(e),
    };
    if let Err(e) = finished {
        let _ = tokio::fs::remove_file(&partial_path).await;
        return Err(e);
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    tracing::info!(target: ARCHIVE_TARGET, "Downloaded: {}", output_path.display());

    Ok(output_path)
}

async fn write_body(
    response: reqwest::Response,
    partial_path: &Path,
    progress: Option<&ProgressBar>,
) -> Result<()> {
    let mut file = File::create(partial_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GalleryItem;
    use crate::media::MediaItem;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.api.base_url = server.uri();
        config.options.download_delay_ms = 0;
        config.options.clear_console = false;
        config.options.show_progress = false;
        config
    }

    fn media_item(id: u64) -> MediaItem {
        MediaItem {
            id: ItemId::Number(id),
            child: "Ada Lovelace".into(),
            timestamp: "2023-01-01T00:00:00Z".into(),
            author: "Grace Hopper".into(),
        }
    }

    fn payload(content_type: &str, body: &[u8]) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("Content-Type", content_type)
            .set_body_bytes(body.to_vec())
    }

    #[tokio::test]
    async fn test_extension_follows_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/media/1/full"))
            .respond_with(payload("image/jpeg", b"jpeg-bytes"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/media/2/full"))
            .respond_with(payload("video/mp4", b"mp4-bytes"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();

        let report = download_items(&api, &config, &[media_item(1), media_item(2)], dir.path())
            .await
            .unwrap();

        assert_eq!(
            report.downloaded,
            vec![dir.path().join("1.jpeg"), dir.path().join("2.mp4")]
        );
        assert_eq!(std::fs::read(dir.path().join("1.jpeg")).unwrap(), b"jpeg-bytes");
        assert!(!dir.path().join(".1.part").exists());
    }

    #[tokio::test]
    async fn test_second_run_makes_no_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/media/5/full"))
            .respond_with(payload("image/png", b"png"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let items = vec![media_item(5)];

        let first = download_items(&api, &config, &items, dir.path()).await.unwrap();
        let second = download_items(&api, &config, &items, dir.path()).await.unwrap();

        assert_eq!(first.attempted(), 1);
        assert_eq!(second.attempted(), 0);
        assert_eq!(second.already_present, 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_recorded_and_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/media/1/full"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/media/2/full"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"??".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/media/3/full"))
            .respond_with(payload("image/gif", b"gif"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();

        let report = download_items(
            &api,
            &config,
            &[media_item(1), media_item(2), media_item(3)],
            dir.path(),
        )
        .await
        .unwrap();

        let failed: Vec<ItemId> = report.failed.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(failed, vec![ItemId::Number(1), ItemId::Number(2)]);
        assert_eq!(report.downloaded, vec![dir.path().join("3.gif")]);
        assert!(!has_file_for(dir.path(), "1"));
    }

    #[tokio::test]
    async fn test_gallery_items_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/media/abc/full"))
            .respond_with(payload("image/jpeg", b"x"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let items: Vec<GalleryItem> =
            serde_json::from_value(serde_json::json!([{"id": "abc"}])).unwrap();

        let report = download_items(&api, &config, &items, dir.path()).await.unwrap();
        assert_eq!(report.downloaded, vec![dir.path().join("abc.jpeg")]);
    }

    #[tokio::test]
    async fn test_unsafe_id_is_not_requested() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let items: Vec<GalleryItem> =
            serde_json::from_value(serde_json::json!([{"id": "../etc"}])).unwrap();

        let report = download_items(&api, &config, &items, dir.path()).await.unwrap();

        assert_eq!(report.failed.len(), 1);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_partial_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/media/5/full"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "image/jpeg")
                    .set_body_bytes(b"jpeg".to_vec()),
            )
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in the way of the final name
        let blocker = dir.path().join("5.jpeg");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        let config = test_config(&server);
        let api = ParentzoneApi::new(&config.api.base_url, "key".into()).unwrap();
        let result = download_item(&api, &config, &ItemId::Number(5), dir.path()).await;

        assert!(result.is_err());
        assert!(!dir.path().join(".5.part").exists());
    }

    fn has_file_for(dir: &Path, stem: &str) -> bool {
        std::fs::read_dir(dir).unwrap().any(|e| {
            e.unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with(&format!("{}.", stem))
        })
    }
}
