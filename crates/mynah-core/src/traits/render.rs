// SPDX-FileCopyrightText: 2026 Mynah Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template renderer trait, used only for `template` actions.

use async_trait::async_trait;

use crate::error::MynahError;

/// Resolves a named template plus parameters into a sendable payload.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(
        &self,
        template: &str,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, MynahError>;
}
