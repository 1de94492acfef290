use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use actix_multipart::form::tempfile::TempFile;
use async_trait::async_trait;
use chrono::Utc;
use derive_more::Display;
use rand::Rng;
use tokio::{fs, io::AsyncReadExt};
use tracing::{info, warn};

use crate::{
    constants::PDF_PUBLIC_PREFIX,
    errors::AppError,
    settings::AppConfig,
    storage::AttachmentStore,
};

const PDF_MIME: &str = "application/pdf";
const SNIFF_BYTES: usize = 512;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum UploadError {
    #[display("Only PDF files are allowed")]
    NotPdf,

    #[display("File is too large. Maximum size is {max_mib}MB.")]
    TooLarge { max_mib: usize },
}

impl std::error::Error for UploadError {}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Writes PDF attachments into a local directory served under `/uploads/blogs`.
#[derive(Debug, Clone)]
pub struct PdfStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl PdfStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        PdfStore { dir: dir.into(), max_bytes }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        PdfStore::new(&config.upload_dir, config.max_upload_bytes)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn check_declared(&self, file: &TempFile) -> Result<(), UploadError> {
        let declared_pdf = file
            .content_type
            .as_ref()
            .is_some_and(|mime| mime.essence_str() == PDF_MIME);

        if !declared_pdf {
            return Err(UploadError::NotPdf);
        }
        if file.size > self.max_bytes {
            return Err(UploadError::TooLarge { max_mib: self.max_bytes.div_ceil(1024 * 1024) });
        }
        Ok(())
    }

    /// Maps a public reference back to a file inside the upload directory.
    fn owned_path(&self, reference: &str) -> Option<PathBuf> {
        let name = reference.strip_prefix(PDF_PUBLIC_PREFIX)?.strip_prefix('/')?;
        let plain = Path::new(name).file_name().is_some_and(|n| n == name);

        plain.then(|| self.dir.join(name))
    }
}

/// Builds `<stem>-<unix millis>-<random><ext>` from the client's file name.
pub fn stored_file_name(original: Option<&str>, millis: i64, random: u32) -> String {
    let original = Path::new(original.unwrap_or_default());

    let stem: String = original
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "document".to_string() } else { stem };

    let ext = original
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| ".pdf".to_string());

    format!("{stem}-{millis}-{random}{ext}")
}

/// Rejects content whose leading bytes identify a type other than PDF.
/// Unrecognizable bytes are left to the declared content type.
fn sniff_agrees(head: &[u8]) -> bool {
    match infer::get(head) {
        Some(kind) => kind.mime_type() == PDF_MIME,
        None => true,
    }
}

#[async_trait]
impl AttachmentStore for PdfStore {
    async fn store_pdf(&self, file: TempFile) -> Result<String, AppError> {
        self.check_declared(&file)?;

        let source = file.file.path().to_path_buf();

        let mut head = vec![0u8; SNIFF_BYTES];
        let read = fs::File::open(&source).await?.read(&mut head).await?;
        if !sniff_agrees(&head[..read]) {
            return Err(UploadError::NotPdf.into());
        }

        let random = rand::thread_rng().gen_range(0..1_000_000_000u32);
        let name = stored_file_name(file.file_name.as_deref(), Utc::now().timestamp_millis(), random);

        fs::create_dir_all(&self.dir).await?;
        fs::copy(&source, self.dir.join(&name)).await?;

        info!(file = %name, size = file.size, "Stored PDF attachment");

        Ok(format!("{}/{}", PDF_PUBLIC_PREFIX, name))
    }

    async fn discard_pdf(&self, reference: &str) -> Result<(), AppError> {
        let Some(path) = self.owned_path(reference) else {
            warn!(%reference, "Refusing to discard a file outside the upload directory");
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(%reference, "Discarded PDF attachment");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_keeps_stem_and_extension() {
        assert_eq!(
            stored_file_name(Some("Rust Notes.PDF"), 1_700_000_000_000, 42),
            "Rust_Notes-1700000000000-42.pdf"
        );
    }

    #[test]
    fn file_name_strips_directories() {
        let name = stored_file_name(Some("../../etc/passwd.pdf"), 1, 2);
        assert_eq!(name, "passwd-1-2.pdf");
    }

    #[test]
    fn file_name_falls_back_when_missing() {
        assert_eq!(stored_file_name(None, 5, 6), "document-5-6.pdf");
    }

    #[test]
    fn sniffing_accepts_pdf_and_unknown_bytes() {
        assert!(sniff_agrees(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3"));
        assert!(sniff_agrees(b"plain words"));
    }

    #[test]
    fn sniffing_rejects_other_known_formats() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
        assert!(!sniff_agrees(&png));
    }

    #[test]
    fn upload_errors_become_bad_requests() {
        let err: AppError = UploadError::TooLarge { max_mib: 10 }.into();
        assert_eq!(err.public_message(), "File is too large. Maximum size is 10MB.");
    }

    fn scratch_store() -> PdfStore {
        let dir = std::env::temp_dir().join(format!("pdf-store-{}", rand::random::<u64>()));
        PdfStore::new(dir, 10 * 1024 * 1024)
    }

    #[test]
    fn only_plain_names_under_the_prefix_are_owned() {
        let store = scratch_store();
        assert_eq!(
            store.owned_path("/uploads/blogs/paper-1-2.pdf"),
            Some(store.dir().join("paper-1-2.pdf"))
        );
        assert_eq!(store.owned_path("/uploads/blogs/../secrets.pdf"), None);
        assert_eq!(store.owned_path("/uploads/blogs/nested/a.pdf"), None);
        assert_eq!(store.owned_path("/elsewhere/a.pdf"), None);
    }

    #[tokio::test]
    async fn discard_removes_the_stored_file() {
        let store = scratch_store();
        fs::create_dir_all(store.dir()).await.unwrap();
        let path = store.dir().join("draft-1-2.pdf");
        fs::write(&path, b"%PDF-1.4").await.unwrap();

        store.discard_pdf("/uploads/blogs/draft-1-2.pdf").await.unwrap();
        assert!(!path.exists());

        // already gone
        store.discard_pdf("/uploads/blogs/draft-1-2.pdf").await.unwrap();
    }
}
