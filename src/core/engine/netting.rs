use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::models::expense::SharedExpense;
use crate::core::models::group::GroupMember;

/// Residual tolerance: one cent. Absorbs floating-point drift left over
/// after per-accumulation rounding; raising it would hide real imbalances.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// One settling payment from a net debtor to a net creditor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementTransfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// One side of the personalized settlement view, with the counterpart's
/// display name resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementEntry {
    pub counterpart_id: String,
    pub counterpart_name: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonalSettlement {
    pub you_owe: Vec<SettlementEntry>,
    pub you_are_owed: Vec<SettlementEntry>,
}

pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Net balance per member: positive = the group owes this member,
/// negative = this member owes the group.
///
/// Every expense credits its payer with the full amount and debits each
/// participant an equal share. A payer inside their own split nets out to
/// a credit of `amount * (1 - 1/k)`; that is the intended equal-split
/// semantics, not a special case. Each accumulation is rounded to cents so
/// drift cannot compound across many small expenses.
pub fn compute_balances(members: &[GroupMember], expenses: &[SharedExpense]) -> HashMap<String, f64> {
    let mut balances: HashMap<String, f64> =
        members.iter().map(|m| (m.user_id.clone(), 0.0)).collect();

    for expense in expenses {
        // Validated upstream; an empty split would divide by zero.
        if expense.participants.is_empty() {
            continue;
        }
        if let Some(credit) = balances.get_mut(&expense.paid_by) {
            *credit = round_to_cents(*credit + expense.amount);
        }
        let share = expense.amount / expense.participants.len() as f64;
        for participant in &expense.participants {
            if let Some(debit) = balances.get_mut(participant) {
                *debit = round_to_cents(*debit - share);
            }
        }
    }

    balances
}

/// Greedy reduction of a balance map to settling transfers.
///
/// Debtors and creditors are taken in member-list order and matched
/// first-to-first, not largest-to-largest, so the transfer count is not
/// globally minimal. The upside is that the output is stable for a given
/// member order. Runs at most |debtors| + |creditors| - 1 iterations.
pub fn reduce_to_transfers(
    members: &[GroupMember],
    balances: &HashMap<String, f64>,
) -> Vec<SettlementTransfer> {
    let mut debtors: Vec<(String, f64)> = Vec::new();
    let mut creditors: Vec<(String, f64)> = Vec::new();
    for member in members {
        let balance = balances.get(&member.user_id).copied().unwrap_or(0.0);
        if balance < -SETTLEMENT_EPSILON {
            debtors.push((member.user_id.clone(), balance));
        } else if balance > SETTLEMENT_EPSILON {
            creditors.push((member.user_id.clone(), balance));
        }
    }

    let mut transfers = Vec::new();
    while !debtors.is_empty() && !creditors.is_empty() {
        let owed = debtors[0].1.abs().min(creditors[0].1);
        let amount = round_to_cents(owed);
        transfers.push(SettlementTransfer {
            from: debtors[0].0.clone(),
            to: creditors[0].0.clone(),
            amount,
        });

        debtors[0].1 += amount;
        creditors[0].1 -= amount;

        if debtors[0].1.abs() <= SETTLEMENT_EPSILON {
            debtors.remove(0);
        }
        if creditors[0].1 <= SETTLEMENT_EPSILON {
            creditors.remove(0);
        }
    }

    transfers
}

/// The current user's "you owe" / "you are owed" slices of the transfer
/// list, with counterpart names resolved from the member list.
pub fn personal_settlement(
    user_id: &str,
    members: &[GroupMember],
    transfers: &[SettlementTransfer],
) -> PersonalSettlement {
    let name_of = |id: &str| {
        members
            .iter()
            .find(|m| m.user_id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let mut summary = PersonalSettlement::default();
    for transfer in transfers {
        if transfer.from == user_id {
            summary.you_owe.push(SettlementEntry {
                counterpart_id: transfer.to.clone(),
                counterpart_name: name_of(&transfer.to),
                amount: transfer.amount,
            });
        } else if transfer.to == user_id {
            summary.you_are_owed.push(SettlementEntry {
                counterpart_id: transfer.from.clone(),
                counterpart_name: name_of(&transfer.from),
                amount: transfer.amount,
            });
        }
    }
    summary
}
