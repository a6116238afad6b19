//! Background thread for image loading (native only)
//!
//! `NativeDecoderThread` decodes local image files with the `image` crate on
//! a worker thread and reports each finished request as a [`LoadCompletion`]
//! on a channel the shell polls. Preloaded files are remembered so a later
//! request for them is answered without decoding again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::error::LoadError;
use crate::gallery::{ImageLoader, LoadCompletion, LoadTicket, LoadedImage};

/// Message sent to the decoder thread.
enum ThreadMessage {
    /// Decode an image and report the result
    Load { ticket: LoadTicket, url: String },
    /// Decode an image into the cache, no report
    Preload { url: String },
    /// Shutdown the thread
    Shutdown,
}

/// Manages a background thread for image decoding.
pub struct NativeDecoderThread {
    /// Sender for requests to the background thread
    request_tx: Sender<ThreadMessage>,
    /// Handle to the background thread (for joining on drop)
    thread_handle: Option<JoinHandle<()>>,
}

impl NativeDecoderThread {
    /// Spawn a new decoder thread. Relative image paths resolve against `base_dir`.
    ///
    /// Completions arrive on the returned receiver.
    pub fn spawn(base_dir: PathBuf) -> std::io::Result<(Self, Receiver<LoadCompletion>)> {
        let (request_tx, request_rx) = mpsc::channel::<ThreadMessage>();
        let (result_tx, result_rx) = mpsc::channel::<LoadCompletion>();

        let thread_handle = thread::Builder::new()
            .name("image-decoder".to_string())
            .spawn(move || {
                log::info!("Native image decoder thread started");
                Self::thread_loop(&base_dir, request_rx, result_tx);
                log::info!("Native image decoder thread exiting");
            })?;

        Ok((
            Self {
                request_tx,
                thread_handle: Some(thread_handle),
            },
            result_rx,
        ))
    }

    /// Background thread main loop.
    fn thread_loop(
        base_dir: &Path,
        request_rx: Receiver<ThreadMessage>,
        result_tx: Sender<LoadCompletion>,
    ) {
        // Dimensions of every image decoded so far
        let mut cache: HashMap<PathBuf, (u32, u32)> = HashMap::new();

        loop {
            match request_rx.recv() {
                Ok(ThreadMessage::Load { ticket, url }) => {
                    let result = decode_cached(base_dir, &url, &mut cache).map(
                        |(width, height)| LoadedImage {
                            url: url.clone(),
                            width,
                            height,
                        },
                    );
                    if result_tx.send(LoadCompletion { ticket, result }).is_err() {
                        log::warn!("Result channel closed, decoder thread exiting");
                        break;
                    }
                }
                Ok(ThreadMessage::Preload { url }) => {
                    if let Err(e) = decode_cached(base_dir, &url, &mut cache) {
                        log::debug!("Preload of {} failed: {}", url, e);
                    }
                }
                Ok(ThreadMessage::Shutdown) => {
                    log::debug!("Received shutdown signal");
                    break;
                }
                Err(_) => {
                    // Channel closed, exit
                    log::debug!("Request channel closed, decoder thread exiting");
                    break;
                }
            }
        }
    }

    fn send(&self, message: ThreadMessage) {
        if self.request_tx.send(message).is_err() {
            log::error!("Failed to send decode request: channel closed");
        }
    }
}

impl ImageLoader for NativeDecoderThread {
    fn request(&mut self, ticket: LoadTicket, url: &str) {
        log::debug!("Requesting {} (seq {})", url, ticket.seq);
        self.send(ThreadMessage::Load {
            ticket,
            url: url.to_string(),
        });
    }

    fn preload(&mut self, url: &str) {
        self.send(ThreadMessage::Preload {
            url: url.to_string(),
        });
    }
}

impl Drop for NativeDecoderThread {
    fn drop(&mut self) {
        // Send shutdown signal
        let _ = self.request_tx.send(ThreadMessage::Shutdown);

        // Wait for thread to finish
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Decoder thread panicked");
            }
        }
    }
}

/// Map an image URL to a local file.
///
/// `file://` URLs and plain paths are accepted; relative paths resolve
/// against `base_dir`. Remote and inline URLs are not supported here.
pub fn resolve_image_path(base_dir: &Path, url: &str) -> Result<PathBuf, LoadError> {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:") {
        return Err(LoadError::Unsupported {
            url: url.to_string(),
            reason: "only local files can be previewed".to_string(),
        });
    }

    let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(base_dir.join(path))
    }
}

fn decode_cached(
    base_dir: &Path,
    url: &str,
    cache: &mut HashMap<PathBuf, (u32, u32)>,
) -> Result<(u32, u32), LoadError> {
    let path = resolve_image_path(base_dir, url)?;
    if let Some(&dims) = cache.get(&path) {
        log::debug!("Cache hit for {:?}", path);
        return Ok(dims);
    }

    let image = image::open(&path).map_err(|e| LoadError::decode(url, e.to_string()))?;
    let dims = (image.width(), image.height());
    log::debug!("Decoded {:?}: {}x{}", path, dims.0, dims.1);
    cache.insert(path, dims);
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_resolve_paths() {
        let base = Path::new("/site");
        assert_eq!(
            resolve_image_path(base, "img/a.png").unwrap(),
            PathBuf::from("/site/img/a.png")
        );
        assert_eq!(
            resolve_image_path(base, "file:///tmp/b.png").unwrap(),
            PathBuf::from("/tmp/b.png")
        );
        assert!(matches!(
            resolve_image_path(base, "https://cdn.example/c.png"),
            Err(LoadError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_decodes_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 3, 2);
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let (mut loader, results) = NativeDecoderThread::spawn(dir.path().to_path_buf()).unwrap();
        let ok = LoadTicket { seq: 1, index: 0 };
        let bad = LoadTicket { seq: 2, index: 1 };
        loader.preload("a.png");
        loader.request(ok, "a.png");
        loader.request(bad, "broken.png");

        let first = results.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(first.ticket, ok);
        let image = first.result.unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.url, "a.png");

        let second = results.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(second.ticket, bad);
        assert!(matches!(second.result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_drop_stops_thread() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, results) = NativeDecoderThread::spawn(dir.path().to_path_buf()).unwrap();
        drop(loader);
        assert!(results.recv_timeout(Duration::from_secs(10)).is_err());
    }
}
