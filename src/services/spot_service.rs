// Copyright 2025 Vijaykumar Singh
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.

//! Spot Service - CRUD over spot documents

use std::sync::Arc;
use tracing::{debug, info};

use super::{log_failure, parse_id};
use crate::core::{MazeError, OpContext, Result, Spot};
use crate::storage::{encode, DocumentId, DocumentStore, DocumentStoreExt, Filter, Update, SPOTS_COLLECTION};

pub struct SpotService {
    store: Arc<dyn DocumentStore>,
    database: String,
}

impl SpotService {
    pub fn new(store: Arc<dyn DocumentStore>, database: impl Into<String>) -> Self {
        Self {
            store,
            database: database.into(),
        }
    }

    /// Persist a spot as given. The request identity, if any, is ignored.
    pub async fn create_spot(&self, ctx: &OpContext, spot: Spot) -> Result<DocumentId> {
        debug!("🆕 Creating spot '{}'", spot.name);

        let document = encode(&Spot { id: None, ..spot }).map_err(MazeError::from)?;
        let id = ctx
            .run("create_spot", self.store.insert_one(&self.database, SPOTS_COLLECTION, document))
            .await
            .map_err(|e| log_failure("create_spot", e))?;

        info!("✅ Spot created: {}", id);
        Ok(id)
    }

    pub async fn get_spot(&self, ctx: &OpContext, id: &str) -> Result<Spot> {
        let id = parse_id("get_spot", id)?;
        debug!("🔍 Getting spot {}", id);
        self.find_spot(ctx, id)
            .await
            .map_err(|e| log_failure("get_spot", e))
    }

    pub async fn list_spots(&self, ctx: &OpContext) -> Result<Vec<Spot>> {
        debug!("📋 Listing all spots");
        ctx.run("list_spots", self.store.find_all_spots(&self.database, SPOTS_COLLECTION))
            .await
            .map_err(|e| log_failure("list_spots", e))
    }

    /// Overwrite every field of the spot. Fields missing from the request
    /// arrive as zero values.
    pub async fn modify_spot(&self, ctx: &OpContext, spot: Spot, id: &str) -> Result<u64> {
        let id = parse_id("modify_spot", id)?;
        let update = Update::new()
            .set("x_coordinate", spot.x_coordinate)
            .set("y_coordinate", spot.y_coordinate)
            .set("name", spot.name)
            .set("number", spot.number);

        let modified = ctx
            .run(
                "modify_spot",
                self.store
                    .update_one(&self.database, SPOTS_COLLECTION, &Filter::by_id(id), &update),
            )
            .await
            .map_err(|e| log_failure("modify_spot", e))?;

        info!("✏️ Spot {} modified ({} affected)", id, modified);
        Ok(modified)
    }

    pub async fn delete_spot(&self, ctx: &OpContext, id: &str) -> Result<u64> {
        let id = parse_id("delete_spot", id)?;
        let deleted = ctx
            .run(
                "delete_spot",
                self.store.delete_one(&self.database, SPOTS_COLLECTION, &Filter::by_id(id)),
            )
            .await
            .map_err(|e| log_failure("delete_spot", e))?;

        info!("🗑️ Spot {} deleted ({} affected)", id, deleted);
        Ok(deleted)
    }

    pub async fn count_spots(&self, ctx: &OpContext) -> Result<u64> {
        ctx.run("count_spots", self.store.estimated_count(&self.database, SPOTS_COLLECTION))
            .await
    }

    async fn find_spot(&self, ctx: &OpContext, id: DocumentId) -> Result<Spot> {
        ctx.run(
            "find_spot",
            self.store
                .find_one_as::<Spot>(&self.database, SPOTS_COLLECTION, &Filter::by_id(id)),
        )
        .await
    }
}
