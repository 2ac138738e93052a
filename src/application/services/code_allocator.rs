//! Collision-free short code allocation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::Link;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved, validate_code};
use crate::utils::url_validator::validate_url;

/// Retry and escalation bounds for generated codes.
///
/// The first `max_base_attempts` attempts use `base_length`; every later
/// attempt uses `escalated_length`, up to `max_total_attempts` in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPolicy {
    pub base_length: usize,
    pub max_base_attempts: u32,
    pub escalated_length: usize,
    pub max_total_attempts: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            base_length: 6,
            max_base_attempts: 5,
            escalated_length: 7,
            max_total_attempts: 20,
        }
    }
}

impl AllocationPolicy {
    /// Default lengths with a custom hard cap on total attempts.
    pub fn with_max_total_attempts(max_total_attempts: u32) -> Self {
        Self {
            max_total_attempts,
            ..Self::default()
        }
    }

    /// Code length used for the zero-based `attempt`.
    pub fn length_for_attempt(&self, attempt: u32) -> usize {
        if attempt < self.max_base_attempts {
            self.base_length
        } else {
            self.escalated_length
        }
    }
}

/// Source of candidate codes.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Uniform random alphanumeric codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

/// Creates links under caller-supplied or generated codes.
///
/// Generated codes are checked with a lookup and then written with an
/// insert-if-absent, so a concurrent creator winning the race between the two
/// shows up as a conflict and is retried. Caller-supplied codes are never
/// retried or escalated.
pub struct CodeAllocator<S: LinkStore + ?Sized> {
    store: Arc<S>,
    generator: Arc<dyn CodeGenerator>,
    policy: AllocationPolicy,
}

impl<S: LinkStore + ?Sized> CodeAllocator<S> {
    /// Creates an allocator drawing random codes.
    pub fn new(store: Arc<S>, policy: AllocationPolicy) -> Self {
        Self::with_generator(store, Arc::new(RandomCodeGenerator), policy)
    }

    pub fn with_generator(
        store: Arc<S>,
        generator: Arc<dyn CodeGenerator>,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Stores `url` under `code`, or under a freshly generated code.
    ///
    /// # Returns
    ///
    /// The stored link: `clicks = 0`, `last_clicked = None`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - `url` is not an absolute http(s) URL
    /// - [`AppError::InvalidCodeFormat`] - `code` is malformed or reserved
    /// - [`AppError::CodeConflict`] - `code` is already stored
    /// - [`AppError::AllocationExhausted`] - no free code within the attempt cap
    /// - [`AppError::StoreFailure`] - database error
    ///
    /// Validation errors are returned before the store is touched.
    pub async fn allocate(&self, url: &str, code: Option<&str>) -> Result<Link, AppError> {
        let url = validate_url(url).map_err(|e| AppError::invalid_url(e.to_string()))?;

        match code {
            Some(code) => self.insert_supplied(code, &url).await,
            None => self.insert_generated(&url).await,
        }
    }

    async fn insert_supplied(&self, code: &str, url: &str) -> Result<Link, AppError> {
        validate_code(code)?;

        match self.store.insert_if_absent(code, url).await? {
            InsertOutcome::Inserted(link) => {
                info!(code, "Created link with supplied code");
                Ok(link)
            }
            InsertOutcome::Conflict => Err(AppError::conflict(code)),
        }
    }

    async fn insert_generated(&self, url: &str) -> Result<Link, AppError> {
        let policy = self.policy;

        for attempt in 0..policy.max_total_attempts {
            let length = policy.length_for_attempt(attempt);

            if attempt == policy.max_base_attempts {
                warn!(
                    attempts = attempt,
                    length, "Repeated collisions, escalating code length"
                );
            }

            let code = self.generator.generate(length);

            if is_reserved(&code) || self.store.lookup(&code).await?.is_some() {
                debug!(code, attempt, "Generated code collides");
                continue;
            }

            match self.store.insert_if_absent(&code, url).await? {
                InsertOutcome::Inserted(link) => {
                    info!(code = %link.code, attempt, "Created link");
                    return Ok(link);
                }
                InsertOutcome::Conflict => {
                    debug!(code, attempt, "Generated code taken concurrently");
                }
            }
        }

        error!(
            attempts = policy.max_total_attempts,
            "Short code allocation exhausted"
        );

        Err(AppError::AllocationExhausted {
            attempts: policy.max_total_attempts,
        })
    }
}
