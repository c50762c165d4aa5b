// src/services/totals.rs

use crate::models::{LineItem, RateBucket, TaxDetails, TaxType};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Currency precision. All monetary values are rounded to 2 decimal places,
/// half away from zero, at line and bucket boundaries.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub struct InvoiceCalculator;

/// Derived totals for a set of line items. Never stored independently;
/// recomputed from the items whenever they change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTotals {
    /// Taxable value: Σ price × quantity across all items.
    pub subtotal: Decimal,
    /// Per-rate buckets, ascending by rate.
    pub breakdown: Vec<RateBucket>,
    pub total_tax: Decimal,
    pub total: Decimal,
}

impl InvoiceCalculator {
    /// Reduce line items to subtotal, per-rate tax breakdown, and grand total.
    ///
    /// Negative quantities and prices are clamped to zero. Items contributing
    /// zero taxable value stay on the invoice but do not open a bucket, so
    /// bucket taxable amounts always sum exactly to the subtotal.
    pub fn compute_totals(items: &[LineItem]) -> InvoiceTotals {
        let mut subtotal = Decimal::ZERO;
        let mut taxable_by_rate: BTreeMap<Decimal, Decimal> = BTreeMap::new();

        for item in items {
            let quantity = Decimal::from(item.quantity.max(0));
            let price = item.price.max(Decimal::ZERO);
            let line_taxable = round_money(price * quantity);

            subtotal += line_taxable;
            if line_taxable > Decimal::ZERO {
                let rate = item.tax_rate_percent.max(Decimal::ZERO);
                *taxable_by_rate.entry(rate).or_insert(Decimal::ZERO) += line_taxable;
            }
        }

        let mut breakdown = Vec::with_capacity(taxable_by_rate.len());
        let mut total_tax = Decimal::ZERO;
        for (rate, taxable) in taxable_by_rate {
            let tax = round_money(taxable * rate / dec!(100));
            total_tax += tax;
            breakdown.push(RateBucket {
                rate: rate.normalize(),
                taxable,
                tax,
            });
        }

        InvoiceTotals {
            subtotal,
            breakdown,
            total_tax,
            total: subtotal + total_tax,
        }
    }

    /// Split the total tax into its GST components. Intra-state sales halve
    /// the tax into CGST + SGST, with CGST absorbing the odd cent so the two
    /// always sum back to the total; inter-state sales carry it all as IGST.
    pub fn tax_details(total_tax: Decimal, tax_type: TaxType) -> TaxDetails {
        match tax_type {
            TaxType::Igst => TaxDetails {
                tax_type,
                cgst_amount: Decimal::ZERO,
                sgst_amount: Decimal::ZERO,
                igst_amount: total_tax,
            },
            TaxType::CgstSgst => {
                let sgst = (total_tax / dec!(2))
                    .round_dp_with_strategy(2, RoundingStrategy::ToZero);
                TaxDetails {
                    tax_type,
                    cgst_amount: total_tax - sgst,
                    sgst_amount: sgst,
                    igst_amount: Decimal::ZERO,
                }
            }
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, price: Decimal, tax_rate: Decimal) -> LineItem {
        LineItem {
            price,
            quantity,
            tax_rate_percent: tax_rate,
            ..LineItem::blank()
        }
    }

    #[test]
    fn worked_example() {
        // 2 × 100 @ 18% + 1 × 50 @ 5%
        // subtotal = 250, tax = 36 + 2.5 = 38.5, total = 288.5
        let items = vec![item(2, dec!(100), dec!(18)), item(1, dec!(50), dec!(5))];

        let totals = InvoiceCalculator::compute_totals(&items);

        assert_eq!(totals.subtotal, dec!(250));
        assert_eq!(totals.total_tax, dec!(38.5));
        assert_eq!(totals.total, dec!(288.5));
        assert_eq!(
            totals.breakdown,
            vec![
                RateBucket {
                    rate: dec!(5),
                    taxable: dec!(50),
                    tax: dec!(2.5)
                },
                RateBucket {
                    rate: dec!(18),
                    taxable: dec!(200),
                    tax: dec!(36)
                },
            ]
        );
    }

    #[test]
    fn empty_list_is_all_zero() {
        let totals = InvoiceCalculator::compute_totals(&[]);

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
        assert!(totals.breakdown.is_empty());
    }

    #[test]
    fn totals_reconcile() {
        let items = vec![
            item(3, dec!(19.99), dec!(18)),
            item(1, dec!(7.45), dec!(12)),
            item(2, dec!(120), dec!(18)),
            item(5, dec!(0.99), dec!(5)),
        ];

        let totals = InvoiceCalculator::compute_totals(&items);

        let bucket_taxable: Decimal = totals.breakdown.iter().map(|b| b.taxable).sum();
        let bucket_tax: Decimal = totals.breakdown.iter().map(|b| b.tax).sum();
        assert_eq!(bucket_taxable, totals.subtotal);
        assert_eq!(bucket_tax, totals.total_tax);
        assert_eq!(totals.total, totals.subtotal + totals.total_tax);
    }

    #[test]
    fn breakdown_sorted_ascending_by_rate() {
        let items = vec![
            item(1, dec!(10), dec!(28)),
            item(1, dec!(10), dec!(5)),
            item(1, dec!(10), dec!(18)),
            item(1, dec!(10), dec!(12)),
        ];

        let totals = InvoiceCalculator::compute_totals(&items);

        let rates: Vec<Decimal> = totals.breakdown.iter().map(|b| b.rate).collect();
        assert_eq!(rates, vec![dec!(5), dec!(12), dec!(18), dec!(28)]);
    }

    #[test]
    fn items_sharing_a_rate_accumulate_into_one_bucket() {
        let items = vec![item(2, dec!(100), dec!(18)), item(1, dec!(50), dec!(18))];

        let totals = InvoiceCalculator::compute_totals(&items);

        assert_eq!(totals.breakdown.len(), 1);
        assert_eq!(totals.breakdown[0].taxable, dec!(250));
        assert_eq!(totals.breakdown[0].tax, dec!(45));
    }

    #[test]
    fn zero_quantity_and_zero_price_contribute_nothing() {
        let items = vec![
            item(0, dec!(100), dec!(18)),
            item(3, dec!(0), dec!(18)),
            item(1, dec!(50), dec!(5)),
        ];

        let totals = InvoiceCalculator::compute_totals(&items);

        assert_eq!(totals.subtotal, dec!(50));
        assert_eq!(totals.breakdown.len(), 1);
        assert_eq!(totals.breakdown[0].rate, dec!(5));
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let items = vec![item(-2, dec!(100), dec!(18)), item(1, dec!(-50), dec!(18))];

        let totals = InvoiceCalculator::compute_totals(&items);

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
        assert!(totals.breakdown.is_empty());
    }

    #[test]
    fn missing_rate_defaults_to_zero_tax() {
        // Wire items with no taxRatePercent decode to 0
        let items = vec![item(2, dec!(40), dec!(0))];

        let totals = InvoiceCalculator::compute_totals(&items);

        assert_eq!(totals.subtotal, dec!(80));
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.breakdown.len(), 1);
        assert_eq!(totals.breakdown[0].tax, Decimal::ZERO);
    }

    #[test]
    fn cgst_sgst_split_is_even() {
        let details = InvoiceCalculator::tax_details(dec!(38.5), TaxType::CgstSgst);

        assert_eq!(details.cgst_amount, dec!(19.25));
        assert_eq!(details.sgst_amount, dec!(19.25));
        assert_eq!(details.igst_amount, Decimal::ZERO);
    }

    #[test]
    fn cgst_absorbs_the_odd_cent() {
        let details = InvoiceCalculator::tax_details(dec!(0.03), TaxType::CgstSgst);

        assert_eq!(details.cgst_amount, dec!(0.02));
        assert_eq!(details.sgst_amount, dec!(0.01));
        assert_eq!(
            details.cgst_amount + details.sgst_amount,
            dec!(0.03)
        );
    }

    #[test]
    fn igst_carries_the_whole_tax() {
        let details = InvoiceCalculator::tax_details(dec!(38.5), TaxType::Igst);

        assert_eq!(details.igst_amount, dec!(38.5));
        assert_eq!(details.cgst_amount, Decimal::ZERO);
        assert_eq!(details.sgst_amount, Decimal::ZERO);
    }

    #[test]
    fn per_line_rounding_matches_displayed_line_totals() {
        // 3 × 33.335 rounds per line (100.01), not per unit or at the end
        let items = vec![item(3, dec!(33.335), dec!(0))];

        let totals = InvoiceCalculator::compute_totals(&items);

        assert_eq!(totals.subtotal, dec!(100.01));
    }
}
