// src/services/task_history_service.rs

use std::collections::HashMap;

use crate::models::{dashboard::MemberTaskHistory, member::Member, task_completion::TaskCompletion};

const UNKNOWN_MEMBER: &str = "Unknown";

/// Folds the completion log per member. Several rows for the same day are
/// all counted; amounts are summed.
pub fn summarize_completions(members: &[Member], completions: &[TaskCompletion]) -> Vec<MemberTaskHistory> {
    let names: HashMap<&str, &str> = members.iter().map(|m| (m.id.as_str(), m.name.as_str())).collect();
    let mut by_member: HashMap<Option<&str>, MemberTaskHistory> = HashMap::new();

    for completion in completions {
        // Unassigned and dangling member ids share one bucket.
        let key = completion
            .member_id
            .as_deref()
            .filter(|id| names.contains_key(id));

        let entry = by_member.entry(key).or_insert_with(|| MemberTaskHistory {
            member_id: key.map(str::to_owned),
            member_name: key
                .and_then(|id| names.get(id))
                .map_or_else(|| UNKNOWN_MEMBER.to_owned(), |name| (*name).to_owned()),
            completion_count: 0,
            completed_count: 0,
            total_amount_collected: 0,
        });

        entry.completion_count += 1;
        if completion.completed {
            entry.completed_count += 1;
        }
        entry.total_amount_collected += i64::from(completion.amount_collected);
    }

    let mut history: Vec<MemberTaskHistory> = by_member.into_values().collect();
    history.sort_by(|a, b| {
        b.completion_count
            .cmp(&a.completion_count)
            .then_with(|| a.member_name.cmp(&b.member_name))
    });
    history
}
