//! Aggregates stored bills and card-derived payments into dated occurrences.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::errors::RecurrenceError;
use crate::ledger::{
    occurrence_dates, Bill, CategoryIndex, CreditCard, DateWindow, DebitCard, Obligation,
    ObligationId, Occurrence, PaymentMethod, Schedule,
};

/// Borrowed inputs of the aggregator.
#[derive(Debug, Clone, Copy)]
pub struct ObligationSources<'a> {
    pub bills: &'a [Bill],
    pub credit_cards: &'a [CreditCard],
    pub debit_cards: &'a [DebitCard],
    pub categories: CategoryIndex<'a>,
}

/// Which card-derived obligations join the stored bills.
///
/// `scheduled` turns each card's configured payment into an obligation,
/// `minimum` adds the minimum amount owed on every card that owes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPaths {
    pub scheduled: bool,
    pub minimum: bool,
}

impl CardPaths {
    pub const NONE: CardPaths = CardPaths {
        scheduled: false,
        minimum: false,
    };
    pub const SCHEDULED: CardPaths = CardPaths {
        scheduled: true,
        minimum: false,
    };
    pub const MINIMUM: CardPaths = CardPaths {
        scheduled: false,
        minimum: true,
    };
    pub const ALL: CardPaths = CardPaths {
        scheduled: true,
        minimum: true,
    };
}

impl Default for CardPaths {
    fn default() -> Self {
        CardPaths::SCHEDULED
    }
}

/// Data problems found while aggregating. None of them abort aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObligationIssue {
    /// A recurring obligation lacks a field its interval needs.
    Configuration {
        id: ObligationId,
        name: String,
        error: RecurrenceError,
    },
    /// A bill references a card that is neither a credit nor a debit card.
    AmbiguousCard {
        bill_id: Uuid,
        name: String,
        card_id: Uuid,
    },
}

impl fmt::Display for ObligationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObligationIssue::Configuration { id, name, error } => {
                write!(f, "`{name}` ({id}) will not recur: {error}")
            }
            ObligationIssue::AmbiguousCard {
                bill_id,
                name,
                card_id,
            } => write!(f, "`{name}` ({bill_id}) references unknown card {card_id}"),
        }
    }
}

pub struct ObligationService;

impl ObligationService {
    /// Builds the obligation list: stored bills first, then card payments in
    /// card order.
    pub fn collect(sources: &ObligationSources<'_>, paths: CardPaths) -> Vec<Obligation> {
        let mut obligations: Vec<Obligation> = sources
            .bills
            .iter()
            .map(|bill| {
                Obligation::from_bill(
                    bill,
                    &sources.categories,
                    sources.credit_cards,
                    sources.debit_cards,
                )
            })
            .collect();
        for obligation in &obligations {
            if let PaymentMethod::Unknown { card_id } = obligation.payment_method {
                warn!(obligation = %obligation.id, %card_id, "bill references an unknown card");
            }
        }
        if paths.scheduled {
            obligations.extend(
                sources
                    .credit_cards
                    .iter()
                    .filter(|card| card.has_scheduled_payment())
                    .map(|card| Obligation::scheduled_card_payment(card, &sources.categories)),
            );
        }
        if paths.minimum {
            obligations.extend(
                sources
                    .credit_cards
                    .iter()
                    .filter(|card| card.owes_minimum())
                    .map(|card| Obligation::minimum_card_payment(card, &sources.categories)),
            );
        }
        obligations
    }

    /// Occurrences of `obligations` with `start <= date <= end`, ordered by
    /// date. Ties keep the order of `obligations`.
    pub fn occurrences(obligations: &[Obligation], start: NaiveDate, end: NaiveDate) -> Vec<Occurrence> {
        let mut occurrences: Vec<Occurrence> = obligations
            .iter()
            .flat_map(|obligation| {
                occurrence_dates(obligation, start, end)
                    .into_iter()
                    .map(move |date| obligation.occur_on(date))
            })
            .collect();
        occurrences.sort_by_key(|occurrence| occurrence.due_date);
        occurrences
    }

    /// Occurrences in the inclusive range `[start, end]`.
    pub fn obligations_in_range(
        sources: &ObligationSources<'_>,
        paths: CardPaths,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Occurrence> {
        let obligations = Self::collect(sources, paths);
        Self::occurrences(&obligations, start, end)
    }

    /// Occurrences in the calendar month containing `reference_month`.
    pub fn monthly_obligations(
        sources: &ObligationSources<'_>,
        paths: CardPaths,
        reference_month: NaiveDate,
    ) -> Vec<Occurrence> {
        let month = DateWindow::month_of(reference_month);
        Self::obligations_in_range(sources, paths, month.start, month.end)
    }

    /// Occurrences of a single stored bill.
    pub fn expand_bill(
        sources: &ObligationSources<'_>,
        bill_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Occurrence>> {
        let bill = sources
            .bills
            .iter()
            .find(|bill| bill.id == bill_id)
            .ok_or_else(|| ServiceError::Invalid(format!("bill `{bill_id}` not found")))?;
        let obligation = Obligation::from_bill(
            bill,
            &sources.categories,
            sources.credit_cards,
            sources.debit_cards,
        );
        Ok(occurrence_dates(&obligation, start, end)
            .into_iter()
            .map(|date| obligation.occur_on(date))
            .collect())
    }

    /// Drops credit-card payments that repeat an earlier entry with the same
    /// category, amount, and due date. Other occurrences are never dropped.
    pub fn dedup_card_payments(occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
        let mut kept: Vec<Occurrence> = Vec::with_capacity(occurrences.len());
        for occurrence in occurrences {
            if occurrence.is_card_payment() {
                let duplicate = kept.iter().any(|existing| {
                    existing.category_kind == occurrence.category_kind
                        && existing.category.as_ref().map(|c| c.id)
                            == occurrence.category.as_ref().map(|c| c.id)
                        && existing.amount == occurrence.amount
                        && existing.due_date == occurrence.due_date
                });
                if duplicate {
                    debug!(
                        obligation = %occurrence.id,
                        due = %occurrence.due_date,
                        "dropping duplicate card payment"
                    );
                    continue;
                }
            }
            kept.push(occurrence);
        }
        kept
    }

    /// Lists every data problem aggregation would silently tolerate.
    pub fn diagnose(sources: &ObligationSources<'_>, paths: CardPaths) -> Vec<ObligationIssue> {
        let mut issues = Vec::new();
        for obligation in Self::collect(sources, paths) {
            if let Schedule::Recurring(rule) = &obligation.schedule {
                if let Err(error) = rule.validate() {
                    issues.push(ObligationIssue::Configuration {
                        id: obligation.id,
                        name: obligation.name.clone(),
                        error,
                    });
                }
            }
            if let (ObligationId::Bill(bill_id), PaymentMethod::Unknown { card_id }) =
                (obligation.id, &obligation.payment_method)
            {
                issues.push(ObligationIssue::AmbiguousCard {
                    bill_id,
                    name: obligation.name.clone(),
                    card_id: *card_id,
                });
            }
        }
        issues
    }
}
