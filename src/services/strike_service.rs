// src/services/strike_service.rs

use std::collections::HashMap;

use crate::models::{dashboard::MemberWithStrikes, member::Member, strike::Strike};

/// Strike count and point total for every member, highest total first.
/// Computed from the rows on each call; nothing is cached.
pub fn summarize_strikes(members: Vec<Member>, strikes: &[Strike]) -> Vec<MemberWithStrikes> {
    let mut totals: HashMap<&str, (usize, i64)> = HashMap::new();
    for strike in strikes {
        let entry = totals.entry(strike.member_id.as_str()).or_default();
        entry.0 += 1;
        entry.1 += i64::from(strike.points);
    }

    let mut summary: Vec<MemberWithStrikes> = members
        .into_iter()
        .map(|member| {
            let (strike_count, total_strike_points) =
                totals.get(member.id.as_str()).copied().unwrap_or_default();
            MemberWithStrikes { member, strike_count, total_strike_points }
        })
        .collect();

    summary.sort_by(|a, b| {
        b.total_strike_points
            .cmp(&a.total_strike_points)
            .then_with(|| a.member.name.cmp(&b.member.name))
    });
    summary
}
