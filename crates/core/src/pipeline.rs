//! End-to-end generation: fetch, specialize, write.

use crate::client::MetadataSource;
use crate::error::Result;
use crate::output::write_document;
use crate::specializer::{OpenApiDocument, specialize};
use crate::template::OpenApiTemplate;
use std::path::Path;
use tracing::info;

/// The object and org a document is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub domain: String,
    pub version: String,
    pub object: String,
}

/// Generates the document for `target` and writes it to `output`.
///
/// Any failure before the write leaves `output` untouched.
pub async fn generate(
    source: &dyn MetadataSource,
    template: &OpenApiTemplate,
    target: &Target,
    output: &Path,
) -> Result<OpenApiDocument> {
    let describe = source.describe(&target.object).await?;
    info!(object = %target.object, fields = describe.fields.len(), "Metadata received");

    let document = specialize(
        template,
        &describe.fields,
        &target.object,
        &target.domain,
        &target.version,
    )?;
    write_document(&document, output)?;

    Ok(document)
}
