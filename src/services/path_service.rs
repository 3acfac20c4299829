// Copyright 2025 Vijaykumar Singh
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.

//! Path Service
//!
//! Paths reference two spots by identity. The distance is recomputed from
//! the current spot coordinates on create, get and modify. `list_paths`
//! returns distances as last written and can lag behind moved spots.

use std::sync::Arc;
use tracing::{debug, info};

use super::{log_failure, parse_id};
use crate::core::{distance, MazeError, OpContext, Path, Result, Spot};
use crate::storage::{
    encode, DocumentId, DocumentStore, DocumentStoreExt, Filter, Update, PATHS_COLLECTION,
    SPOTS_COLLECTION,
};

pub struct PathService {
    store: Arc<dyn DocumentStore>,
    database: String,
}

impl PathService {
    pub fn new(store: Arc<dyn DocumentStore>, database: impl Into<String>) -> Self {
        Self {
            store,
            database: database.into(),
        }
    }

    /// Resolve both endpoints and store the path with its distance.
    /// Nothing is written if either spot cannot be found.
    pub async fn create_path(&self, ctx: &OpContext, point_a: &str, point_b: &str) -> Result<DocumentId> {
        let point_a = parse_id("create_path", point_a)?;
        let point_b = parse_id("create_path", point_b)?;
        debug!("🆕 Creating path {} -> {}", point_a, point_b);

        let distance = self
            .endpoint_distance(ctx, point_a, point_b)
            .await
            .map_err(|e| log_failure("create_path", e))?;

        let path = Path {
            id: None,
            point_a,
            point_b,
            distance,
        };
        let document = encode(&path).map_err(MazeError::from)?;
        let id = ctx
            .run("create_path", self.store.insert_one(&self.database, PATHS_COLLECTION, document))
            .await
            .map_err(|e| log_failure("create_path", e))?;

        info!("✅ Path created: {} (distance {})", id, distance);
        Ok(id)
    }

    /// Load a path and refresh its distance from the current endpoints
    pub async fn get_path(&self, ctx: &OpContext, id: &str) -> Result<Path> {
        let id = parse_id("get_path", id)?;
        debug!("🔍 Getting path {}", id);

        let mut path = ctx
            .run(
                "get_path",
                self.store
                    .find_one_as::<Path>(&self.database, PATHS_COLLECTION, &Filter::by_id(id)),
            )
            .await
            .map_err(|e| log_failure("get_path", e))?;

        path.distance = self
            .endpoint_distance(ctx, path.point_a, path.point_b)
            .await
            .map_err(|e| log_failure("get_path", e))?;

        Ok(path)
    }

    /// Every stored path with the distance it was written with
    pub async fn list_paths(&self, ctx: &OpContext) -> Result<Vec<Path>> {
        debug!("📋 Listing all paths");
        ctx.run("list_paths", self.store.find_all_paths(&self.database, PATHS_COLLECTION))
            .await
            .map_err(|e| log_failure("list_paths", e))
    }

    /// Point the path at new endpoints and store the recomputed distance
    pub async fn modify_path(&self, ctx: &OpContext, point_a: &str, point_b: &str, id: &str) -> Result<u64> {
        let id = parse_id("modify_path", id)?;
        let point_a = parse_id("modify_path", point_a)?;
        let point_b = parse_id("modify_path", point_b)?;

        let distance = self
            .endpoint_distance(ctx, point_a, point_b)
            .await
            .map_err(|e| log_failure("modify_path", e))?;

        let update = Update::new()
            .set("point_a", point_a)
            .set("point_b", point_b)
            .set("distance", distance);

        let modified = ctx
            .run(
                "modify_path",
                self.store
                    .update_one(&self.database, PATHS_COLLECTION, &Filter::by_id(id), &update),
            )
            .await
            .map_err(|e| log_failure("modify_path", e))?;

        info!("✏️ Path {} modified ({} affected)", id, modified);
        Ok(modified)
    }

    pub async fn delete_path(&self, ctx: &OpContext, id: &str) -> Result<u64> {
        let id = parse_id("delete_path", id)?;
        let deleted = ctx
            .run(
                "delete_path",
                self.store.delete_one(&self.database, PATHS_COLLECTION, &Filter::by_id(id)),
            )
            .await
            .map_err(|e| log_failure("delete_path", e))?;

        info!("🗑️ Path {} deleted ({} affected)", id, deleted);
        Ok(deleted)
    }

    pub async fn count_paths(&self, ctx: &OpContext) -> Result<u64> {
        ctx.run("count_paths", self.store.estimated_count(&self.database, PATHS_COLLECTION))
            .await
    }

    async fn endpoint_distance(&self, ctx: &OpContext, point_a: DocumentId, point_b: DocumentId) -> Result<f64> {
        let spot_a = self.resolve_spot(ctx, point_a).await?;
        let spot_b = self.resolve_spot(ctx, point_b).await?;
        Ok(distance(&spot_a, &spot_b))
    }

    async fn resolve_spot(&self, ctx: &OpContext, id: DocumentId) -> Result<Spot> {
        ctx.run(
            "resolve_spot",
            self.store
                .find_one_as::<Spot>(&self.database, SPOTS_COLLECTION, &Filter::by_id(id)),
        )
        .await
    }
}
