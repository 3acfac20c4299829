// Copyright 2025 Vijaykumar Singh
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.

//! Quadrant Service - origin singleton and spot classification
//!
//! At most one origin document exists. Creation goes through the store's
//! atomic conditional insert, so two concurrent creates cannot both
//! succeed.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::log_failure;
use crate::core::{MazeError, OpContext, Origin, Quadrant, Result, Spot};
use crate::storage::{
    encode, DocumentId, DocumentStore, DocumentStoreExt, Filter, Update, ORIGIN_COLLECTION,
    SPOTS_COLLECTION,
};

pub struct QuadrantService {
    store: Arc<dyn DocumentStore>,
    database: String,
}

impl QuadrantService {
    pub fn new(store: Arc<dyn DocumentStore>, database: impl Into<String>) -> Self {
        Self {
            store,
            database: database.into(),
        }
    }

    /// Store the origin, failing with `OriginExists` if one is present
    pub async fn create_origin(&self, ctx: &OpContext, origin: Origin) -> Result<DocumentId> {
        debug!("🆕 Creating origin at ({}, {})", origin.x_origin, origin.y_origin);

        let document = encode(&origin).map_err(MazeError::from)?;
        let inserted = ctx
            .run(
                "create_origin",
                self.store.insert_if_empty(&self.database, ORIGIN_COLLECTION, document),
            )
            .await
            .map_err(|e| log_failure("create_origin", e))?;

        match inserted {
            Some(id) => {
                info!("✅ Origin created: {}", id);
                Ok(id)
            }
            None => {
                warn!("⚠️ Rejected second origin at ({}, {})", origin.x_origin, origin.y_origin);
                Err(MazeError::OriginExists)
            }
        }
    }

    pub async fn get_origin(&self, ctx: &OpContext) -> Result<Origin> {
        self.load_origin(ctx)
            .await
            .map_err(|e| log_failure("get_origin", e))
    }

    /// Overwrite the coordinates of the origin, touching at most one
    /// document. Returns 0 when no origin exists.
    pub async fn modify_origin(&self, ctx: &OpContext, origin: Origin) -> Result<u64> {
        let update = Update::new()
            .set("x_origin", origin.x_origin)
            .set("y_origin", origin.y_origin);

        let modified = ctx
            .run(
                "modify_origin",
                self.store
                    .update_one(&self.database, ORIGIN_COLLECTION, &Filter::empty(), &update),
            )
            .await
            .map_err(|e| log_failure("modify_origin", e))?;

        info!("✏️ Origin modified ({} affected)", modified);
        Ok(modified)
    }

    /// Remove every origin document. Zero affected when none exists.
    pub async fn delete_origin(&self, ctx: &OpContext) -> Result<u64> {
        let deleted = ctx
            .run(
                "delete_origin",
                self.store.delete_many(&self.database, ORIGIN_COLLECTION, &Filter::empty()),
            )
            .await
            .map_err(|e| log_failure("delete_origin", e))?;

        info!("🗑️ Origin deleted ({} affected)", deleted);
        Ok(deleted)
    }

    /// Spots inside `quadrant` relative to the current origin
    pub async fn spots_in_quadrant(&self, ctx: &OpContext, quadrant: Quadrant) -> Result<Vec<Spot>> {
        debug!("🧭 Classifying spots into {}", quadrant);

        let spots = ctx
            .run("spots_in_quadrant", self.store.find_all_spots(&self.database, SPOTS_COLLECTION))
            .await
            .map_err(|e| log_failure("spots_in_quadrant", e))?;
        let origin = self
            .load_origin(ctx)
            .await
            .map_err(|e| log_failure("spots_in_quadrant", e))?;

        Ok(spots
            .into_iter()
            .filter(|spot| quadrant.contains(&origin, spot))
            .collect())
    }

    pub async fn count_origins(&self, ctx: &OpContext) -> Result<u64> {
        ctx.run("count_origins", self.store.estimated_count(&self.database, ORIGIN_COLLECTION))
            .await
    }

    async fn load_origin(&self, ctx: &OpContext) -> Result<Origin> {
        let origins = ctx
            .run("load_origin", self.store.find_all_origins(&self.database, ORIGIN_COLLECTION))
            .await?;

        if origins.len() > 1 {
            warn!("⚠️ Found {} origin documents, using the first", origins.len());
        }
        origins.into_iter().next().ok_or(MazeError::NoOrigin)
    }
}
