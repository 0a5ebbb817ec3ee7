//! Clasificación e ingesta de archivos del formulario de quote
//!
//! Recibe los file parts del multipart en orden, clasifica cada uno por el
//! prefijo de su field name, aplica el tope de tamaño por archivo y sube
//! los aceptados al content store. La ingesta es best-effort: un archivo
//! rechazado o un fallo de subida nunca aborta el resto del lote ni la
//! creación de la quote; cada archivo queda registrado en un ledger de
//! resultados para que el caller pueda exponer el fallo parcial.

use serde::Serialize;

use crate::services::content_store::ContentStore;

/// Tope de tamaño por archivo por defecto: 10 MiB
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Cuántos slots admite una categoría
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Un solo slot; una subida posterior reemplaza a la anterior
    SingleSlot,
    /// Lista ordenada de referencias
    MultiSlot,
}

/// Categorías de archivo del formulario de quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileCategory {
    Techpack,
    ProductImages,
    ColorSwatch,
    Fabric,
    Miscellaneous,
}

/// Tabla ordenada de prefijos. El primer prefijo que matchea gana y la
/// comparación es case-sensitive.
const CATEGORY_PREFIXES: [(&str, FileCategory); 5] = [
    ("techpack", FileCategory::Techpack),
    ("productImages", FileCategory::ProductImages),
    ("colorSwatch", FileCategory::ColorSwatch),
    ("fabric", FileCategory::Fabric),
    ("miscellaneous", FileCategory::Miscellaneous),
];

impl FileCategory {
    /// Clasificar un field name por prefijo; None si no matchea ninguno
    pub fn classify(field_name: &str) -> Option<FileCategory> {
        CATEGORY_PREFIXES
            .iter()
            .find(|(prefix, _)| field_name.starts_with(prefix))
            .map(|(_, category)| *category)
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            FileCategory::Techpack => CategoryKind::SingleSlot,
            _ => CategoryKind::MultiSlot,
        }
    }

    /// Hint de categoría que viaja al content store
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Techpack => "techpack",
            FileCategory::ProductImages => "productImages",
            FileCategory::ColorSwatch => "colorSwatch",
            FileCategory::Fabric => "fabric",
            FileCategory::Miscellaneous => "miscellaneous",
        }
    }
}

/// Un file part del multipart, ya leído a memoria
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field_name: String,
    pub bytes: Vec<u8>,
}

/// Resultado por archivo de la ingesta
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Stored {
        field_name: String,
        category: FileCategory,
        url: String,
    },
    SkippedTooLarge {
        field_name: String,
        size: usize,
        limit: usize,
    },
    SkippedUploadFailed {
        field_name: String,
        category: FileCategory,
    },
    SkippedUnknownField {
        field_name: String,
    },
}

/// Referencias clasificadas listas para persistir en la quote, más el
/// ledger por archivo
#[derive(Debug, Default)]
pub struct IngestedFiles {
    pub techpack_file: Option<String>,
    pub product_images_files: Vec<String>,
    pub color_swatch_files: Vec<String>,
    pub fabric_files: Vec<String>,
    pub miscellaneous_files: Vec<String>,
    pub outcomes: Vec<FileOutcome>,
}

impl IngestedFiles {
    fn push(&mut self, category: FileCategory, url: String) {
        match category {
            // Single slot: la última subida gana
            FileCategory::Techpack => self.techpack_file = Some(url),
            FileCategory::ProductImages => self.product_images_files.push(url),
            FileCategory::ColorSwatch => self.color_swatch_files.push(url),
            FileCategory::Fabric => self.fabric_files.push(url),
            FileCategory::Miscellaneous => self.miscellaneous_files.push(url),
        }
    }
}

/// Servicio de ingesta de archivos
pub struct FileIngestionService {
    max_file_bytes: usize,
}

impl Default for FileIngestionService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl FileIngestionService {
    pub fn new(max_file_bytes: usize) -> Self {
        Self { max_file_bytes }
    }

    /// Procesar el lote completo de file parts en el orden recibido.
    ///
    /// Nunca devuelve error: los fallos por archivo se loguean y quedan en
    /// el ledger. Un archivo exactamente en el límite se acepta; un byte
    /// por encima se salta.
    pub async fn ingest(&self, parts: Vec<FilePart>, store: &dyn ContentStore) -> IngestedFiles {
        let mut ingested = IngestedFiles::default();

        for part in parts {
            let Some(category) = FileCategory::classify(&part.field_name) else {
                log::debug!("Field '{}' sin categoría, se omite", part.field_name);
                ingested.outcomes.push(FileOutcome::SkippedUnknownField {
                    field_name: part.field_name,
                });
                continue;
            };

            if part.bytes.len() > self.max_file_bytes {
                log::warn!(
                    "⚠️ Archivo '{}' supera el límite ({} > {} bytes), se omite",
                    part.field_name,
                    part.bytes.len(),
                    self.max_file_bytes
                );
                ingested.outcomes.push(FileOutcome::SkippedTooLarge {
                    field_name: part.field_name,
                    size: part.bytes.len(),
                    limit: self.max_file_bytes,
                });
                continue;
            }

            match store.store(&part.bytes, category.as_str()).await {
                Ok(stored) => {
                    ingested.push(category, stored.url.clone());
                    ingested.outcomes.push(FileOutcome::Stored {
                        field_name: part.field_name,
                        category,
                        url: stored.url,
                    });
                }
                Err(e) => {
                    // Un fallo de subida no aborta el resto del lote
                    log::error!(
                        "❌ Error subiendo '{}' al content store: {}",
                        part.field_name,
                        e
                    );
                    ingested.outcomes.push(FileOutcome::SkippedUploadFailed {
                        field_name: part.field_name,
                        category,
                    });
                }
            }
        }

        ingested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::content_store::StoredFile;
    use crate::utils::errors::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store en memoria que numera las subidas y puede fallar para un
    /// field concreto (por el hint no se puede, así que falla por tamaño 13)
    struct MockStore {
        counter: AtomicUsize,
        fail_on_len: Option<usize>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                counter: AtomicUsize::new(0),
                fail_on_len: None,
            }
        }

        fn failing_on_len(len: usize) -> Self {
            Self {
                counter: AtomicUsize::new(0),
                fail_on_len: Some(len),
            }
        }
    }

    #[async_trait]
    impl ContentStore for MockStore {
        async fn store(&self, bytes: &[u8], category_hint: &str) -> Result<StoredFile, AppError> {
            if self.fail_on_len == Some(bytes.len()) {
                return Err(AppError::ContentStore("mock upload failure".to_string()));
            }
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(StoredFile {
                url: format!("https://store.example/{}/{}", category_hint, n),
            })
        }
    }

    fn part(field_name: &str, size: usize) -> FilePart {
        FilePart {
            field_name: field_name.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_classification_by_prefix_is_case_sensitive() {
        assert_eq!(FileCategory::classify("techpack"), Some(FileCategory::Techpack));
        assert_eq!(
            FileCategory::classify("techpack-main"),
            Some(FileCategory::Techpack)
        );
        assert_eq!(
            FileCategory::classify("productImages-1"),
            Some(FileCategory::ProductImages)
        );
        assert_eq!(
            FileCategory::classify("colorSwatch0"),
            Some(FileCategory::ColorSwatch)
        );
        assert_eq!(FileCategory::classify("fabricSample"), Some(FileCategory::Fabric));
        assert_eq!(
            FileCategory::classify("miscellaneousDoc"),
            Some(FileCategory::Miscellaneous)
        );
        // Case-sensitive: mayúsculas no matchean
        assert_eq!(FileCategory::classify("Techpack"), None);
        assert_eq!(FileCategory::classify("productimages-1"), None);
        assert_eq!(FileCategory::classify("attachment-1"), None);
    }

    #[test]
    fn test_techpack_is_the_only_single_slot_category() {
        assert_eq!(FileCategory::Techpack.kind(), CategoryKind::SingleSlot);
        for category in [
            FileCategory::ProductImages,
            FileCategory::ColorSwatch,
            FileCategory::Fabric,
            FileCategory::Miscellaneous,
        ] {
            assert_eq!(category.kind(), CategoryKind::MultiSlot);
        }
    }

    #[tokio::test]
    async fn test_file_at_exact_limit_is_accepted_one_byte_over_is_skipped() {
        let service = FileIngestionService::new(100);
        let store = MockStore::new();

        let result = service
            .ingest(
                vec![part("productImages-1", 100), part("productImages-2", 101)],
                &store,
            )
            .await;

        assert_eq!(result.product_images_files.len(), 1);
        assert!(matches!(
            result.outcomes[0],
            FileOutcome::Stored { .. }
        ));
        assert!(matches!(
            result.outcomes[1],
            FileOutcome::SkippedTooLarge { size: 101, limit: 100, .. }
        ));
    }

    #[tokio::test]
    async fn test_unknown_fields_are_skipped_silently() {
        let service = FileIngestionService::default();
        let store = MockStore::new();

        let result = service
            .ingest(vec![part("avatar", 10), part("fabric-1", 10)], &store)
            .await;

        assert!(result.product_images_files.is_empty());
        assert_eq!(result.fabric_files.len(), 1);
        assert!(matches!(
            result.outcomes[0],
            FileOutcome::SkippedUnknownField { .. }
        ));
    }

    #[tokio::test]
    async fn test_upload_failure_does_not_abort_remaining_files() {
        let service = FileIngestionService::default();
        // Falla solo la subida del archivo de 13 bytes
        let store = MockStore::failing_on_len(13);

        let result = service
            .ingest(
                vec![
                    part("productImages-1", 10),
                    part("productImages-2", 13),
                    part("productImages-3", 11),
                ],
                &store,
            )
            .await;

        assert_eq!(result.product_images_files.len(), 2);
        assert!(matches!(
            result.outcomes[1],
            FileOutcome::SkippedUploadFailed { .. }
        ));
        assert!(matches!(result.outcomes[2], FileOutcome::Stored { .. }));
    }

    #[tokio::test]
    async fn test_category_lists_preserve_input_order() {
        let service = FileIngestionService::default();
        let store = MockStore::new();

        let result = service
            .ingest(
                vec![
                    part("productImages-1", 10),
                    part("colorSwatch-1", 10),
                    part("productImages-2", 10),
                ],
                &store,
            )
            .await;

        assert_eq!(
            result.product_images_files,
            vec![
                "https://store.example/productImages/0".to_string(),
                "https://store.example/productImages/2".to_string(),
            ]
        );
        assert_eq!(
            result.color_swatch_files,
            vec!["https://store.example/colorSwatch/1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_techpack_last_write_wins() {
        let service = FileIngestionService::default();
        let store = MockStore::new();

        let result = service
            .ingest(vec![part("techpack-a", 10), part("techpack-b", 10)], &store)
            .await;

        assert_eq!(
            result.techpack_file,
            Some("https://store.example/techpack/1".to_string())
        );
    }

    #[tokio::test]
    async fn test_skipped_files_never_reach_category_lists() {
        let service = FileIngestionService::new(50);
        let store = MockStore::new();

        let result = service
            .ingest(vec![part("productImages-1", 51)], &store)
            .await;

        assert!(result.product_images_files.is_empty());
        assert!(result.techpack_file.is_none());
        assert_eq!(result.outcomes.len(), 1);
    }
}
