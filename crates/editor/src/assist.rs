//! AI collaborator contract.
//!
//! The engine never blocks on a collaborator: the asynchronous boundary sits
//! entirely outside it. The host awaits a single response, then applies it
//! through an ordinary synchronous verb. Every response field is optional —
//! the collaborator's output shape is never trusted — and a stale response
//! whose target block has been deleted while the request was in flight is a
//! silent no-op ("apply only if still present").

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::BlockCatalog;
use crate::document::{path, BlockInstance, Document, Props};
use crate::error::{EditorError, EditorResult};
use crate::markdown::blocks_from_markdown;

/// Request to rewrite a piece of text under an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineRequest {
    pub text: String,
    pub instruction: String,
}

/// Response to a [`RefineRequest`]. Both fields are optional by contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefineResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RefineResponse {
    /// Extract the refined text, turning a declared or empty response into
    /// a collaborator error.
    pub fn into_text(self) -> EditorResult<String> {
        if let Some(error) = self.error {
            return Err(EditorError::Collaborator(error));
        }
        self.text
            .ok_or_else(|| EditorError::Collaborator("empty response".to_string()))
    }
}

/// Request to draft content from a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    pub prompt: String,
    pub content_type: String,
}

/// Response to a [`DraftRequest`]. Every field is optional by contract;
/// missing fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// The seam a host implements to provide AI assistance. Called outside the
/// engine; results come back through synchronous verbs.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Rewrite text under an instruction.
    async fn refine(&self, request: RefineRequest) -> EditorResult<RefineResponse>;

    /// Draft content from a prompt.
    async fn draft(&self, request: DraftRequest) -> EditorResult<DraftResponse>;
}

/// Apply a refined text result to the block that requested it, writing its
/// `content` prop. A target deleted while the request was in flight is a
/// no-op.
pub fn apply_refined_text(doc: &Document, id: Uuid, text: &str) -> Document {
    let Some(block) = path::find_block(doc, id) else {
        debug!(%id, "refine target no longer present, dropping stale response");
        return doc.clone();
    };
    let mut props = block.props.clone();
    props.insert("content".to_string(), Value::from(text));
    doc.with_block_props(id, props)
}

/// Convert a draft response into block instances: an optional level-1
/// heading from the title, then the markdown content converted block by
/// block. An empty response yields no blocks.
pub fn draft_blocks(response: &DraftResponse, catalog: &BlockCatalog) -> Vec<BlockInstance> {
    let mut blocks = Vec::new();
    if let Some(title) = response.title.as_deref().filter(|t| !t.trim().is_empty()) {
        let mut props = Props::new();
        props.insert("content".to_string(), Value::from(title.trim()));
        props.insert("level".to_string(), Value::from(1u64));
        blocks.push(
            catalog
                .create_instance("heading", props.clone())
                .unwrap_or_else(|| BlockInstance::new("heading", props)),
        );
    }
    if let Some(content) = &response.content {
        blocks.extend(blocks_from_markdown(content, catalog));
    }
    blocks
}
