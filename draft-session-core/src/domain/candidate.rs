use rand::seq::SliceRandom;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a candidate, unique within the catalog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CandidateId(u32);

impl CandidateId {
    pub const fn new(id: u32) -> Self {
        CandidateId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CandidateId {
    fn from(id: u32) -> Self {
        CandidateId(id)
    }
}

/// Fixed list of venues every pool is drawn from: (id, name, image)
pub const CATALOG: [(u32, &str, &str); 11] = [
    (1, "Bind", "bind.webp"),
    (2, "Haven", "haven.webp"),
    (3, "Split", "split.webp"),
    (4, "Ascent", "ascent.webp"),
    (5, "Icebox", "icebox.webp"),
    (6, "Breeze", "breeze.webp"),
    (7, "Fracture", "fracture.webp"),
    (8, "Pearl", "pearl.webp"),
    (9, "Lotus", "lotus.webp"),
    (10, "Sunset", "sunset.webp"),
    (11, "Abyss", "abyss.webp"),
];

/// Number of candidates drawn for every new session
pub const DEFAULT_DRAW_SIZE: usize = 7;

/// One venue in a session's pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    id: CandidateId,
    name: String,
    image_ref: String,
    banned: bool,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Candidate {
            id,
            name: name.into(),
            image_ref: image_ref.into(),
            banned: false,
        }
    }

    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn is_banned(&self) -> bool {
        self.banned
    }

    /// Mark the candidate as banned. Only the session aggregate flips this.
    pub(crate) fn ban(&mut self) {
        self.banned = true;
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolError {
    #[error("Pool size {requested} exceeds catalog size {available}")]
    PoolExceedsCatalog { requested: usize, available: usize },

    #[error("Draw size {draw_size} exceeds pool size {pool_size}")]
    DrawExceedsPool { draw_size: usize, pool_size: usize },
}

/// Draw `draw_size` distinct candidates from the first `pool_size` catalog entries.
///
/// The entries are permuted with a Fisher-Yates shuffle, so every subset and
/// every ordering of it is equally likely for a uniform `rng`.
pub fn generate_pool<R: Rng + ?Sized>(
    pool_size: usize,
    draw_size: usize,
    rng: &mut R,
) -> Result<Vec<Candidate>, PoolError> {
    if pool_size > CATALOG.len() {
        return Err(PoolError::PoolExceedsCatalog {
            requested: pool_size,
            available: CATALOG.len(),
        });
    }
    if draw_size > pool_size {
        return Err(PoolError::DrawExceedsPool {
            draw_size,
            pool_size,
        });
    }

    let mut entries: Vec<_> = CATALOG[..pool_size].to_vec();
    entries.shuffle(rng);
    entries.truncate(draw_size);

    Ok(entries
        .into_iter()
        .map(|(id, name, image)| Candidate::new(CandidateId::new(id), name, image))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_pool_draws_distinct_unbanned_candidates() {
        let mut rng = StdRng::seed_from_u64(7);

        for draw_size in 0..=CATALOG.len() {
            let pool = generate_pool(CATALOG.len(), draw_size, &mut rng).unwrap();

            assert_eq!(pool.len(), draw_size);
            assert!(pool.iter().all(|c| !c.is_banned()));

            let ids: HashSet<_> = pool.iter().map(Candidate::id).collect();
            assert_eq!(ids.len(), draw_size);
        }
    }

    #[test]
    fn test_generate_pool_respects_pool_size() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool = generate_pool(4, 4, &mut rng).unwrap();

        let mut ids: Vec<u32> = pool.iter().map(|c| c.id().value()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_generate_pool_rejects_oversized_requests() {
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generate_pool(CATALOG.len() + 1, 3, &mut rng),
            Err(PoolError::PoolExceedsCatalog {
                requested: 12,
                available: 11
            })
        );
        assert_eq!(
            generate_pool(5, 6, &mut rng),
            Err(PoolError::DrawExceedsPool {
                draw_size: 6,
                pool_size: 5
            })
        );
    }

    #[test]
    fn test_candidate_fields_come_from_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = generate_pool(CATALOG.len(), DEFAULT_DRAW_SIZE, &mut rng).unwrap();

        for candidate in &pool {
            let (_, name, image) = CATALOG
                .iter()
                .find(|(id, _, _)| *id == candidate.id().value())
                .unwrap();
            assert_eq!(candidate.name(), *name);
            assert_eq!(candidate.image_ref(), *image);
        }
    }

    #[test]
    fn test_first_position_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let rounds = 11_000;
        let mut counts: HashMap<u32, usize> = HashMap::new();

        for _ in 0..rounds {
            let pool = generate_pool(CATALOG.len(), 1, &mut rng).unwrap();
            *counts.entry(pool[0].id().value()).or_default() += 1;
        }

        // Expected 1000 per entry; a biased comparator shuffle drifts far outside this band
        assert_eq!(counts.len(), CATALOG.len());
        for count in counts.values() {
            assert!((800..1200).contains(count), "count {} out of band", count);
        }
    }

    #[test]
    fn test_candidate_serializes_wire_shape() {
        let candidate = Candidate::new(CandidateId::new(4), "Ascent", "ascent.webp");
        let json = serde_json::to_value(&candidate).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "name": "Ascent",
                "imageRef": "ascent.webp",
                "banned": false
            })
        );
    }
}
