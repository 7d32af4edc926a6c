//! Property tests for the pure client-side logic.
//!
//! Guarantees exercised here:
//! - The job-board partition is exhaustive over postings and its two lists
//!   are disjoint.
//! - Match ranking is filtered to the requesting user and ordered by score
//!   descending.

use std::collections::HashSet;

use proptest::prelude::*;
use uuid::Uuid;
use worknet_domain::{partition_jobs, rank_for_user, Job, JobId, MatchSuggestion, UserId};

/// A small pool of user IDs so ownership collisions actually happen.
fn user_pool() -> Vec<UserId> {
    (0..4).map(|i| UserId(Uuid::from_u128(i))).collect()
}

fn arb_job(pool: Vec<UserId>) -> impl Strategy<Value = Job> {
    (0..pool.len(), any::<bool>()).prop_map(move |(owner, posting)| {
        if posting {
            Job::posting(pool[owner], "t")
        } else {
            Job::work_item(pool[owner], "t")
        }
    })
}

proptest! {
    #[test]
    fn partition_is_disjoint_and_covers_postings(
        jobs in prop::collection::vec(arb_job(user_pool()), 0..32),
        saved_picks in prop::collection::vec(any::<bool>(), 0..32),
        viewer_idx in 0..4usize,
    ) {
        let viewer = user_pool()[viewer_idx];
        let saved_ids: HashSet<JobId> = jobs
            .iter()
            .zip(saved_picks.iter())
            .filter_map(|(job, pick)| pick.then_some(job.id))
            .collect();

        let board = partition_jobs(jobs.clone(), &saved_ids, viewer);

        let recommended: HashSet<JobId> = board.recommended.iter().map(|j| j.id).collect();
        let saved: HashSet<JobId> = board.saved.iter().map(|j| j.id).collect();

        // Disjointness.
        prop_assert!(recommended.is_disjoint(&saved));

        // Every posting lands in exactly one bucket unless it is the
        // viewer's own unsaved posting; non-postings land in neither.
        for job in &jobs {
            let in_recommended = recommended.contains(&job.id);
            let in_saved = saved.contains(&job.id);
            if !job.is_job_posting {
                prop_assert!(!in_recommended && !in_saved);
            } else if saved_ids.contains(&job.id) {
                prop_assert!(in_saved && !in_recommended);
            } else if job.user_id == viewer {
                prop_assert!(!in_recommended && !in_saved);
            } else {
                prop_assert!(in_recommended && !in_saved);
            }
        }
    }

    #[test]
    fn ranking_is_sorted_and_filtered(
        scores in prop::collection::vec(0.0f64..1.0, 0..32),
        owner_picks in prop::collection::vec(0..4usize, 0..32),
    ) {
        let pool = user_pool();
        let me = pool[0];
        let suggestions: Vec<MatchSuggestion> = scores
            .iter()
            .zip(owner_picks.iter())
            .enumerate()
            .map(|(i, (score, owner))| MatchSuggestion {
                id: format!("m{i}"),
                user_id: pool[*owner],
                candidate_id: pool[(*owner + 1) % pool.len()],
                score: *score,
                shared_skills: Vec::new(),
            })
            .collect();

        let expected_len = suggestions.iter().filter(|s| s.user_id == me).count();
        let ranked = rank_for_user(suggestions, me);

        prop_assert_eq!(ranked.len(), expected_len);
        prop_assert!(ranked.iter().all(|s| s.user_id == me));
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
