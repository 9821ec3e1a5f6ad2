//! VAT / sales tax return

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::models::{TaxCode, TaxDocument};
use crate::period::DateRange;
use crate::reports::{TaxCodeSummary, TaxReturn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Sales,
    Purchases,
}

#[derive(Default)]
struct Totals {
    net_sales: Decimal,
    output_tax: Decimal,
    net_purchases: Decimal,
    input_tax: Decimal,
}

impl Totals {
    fn add(&mut self, side: Side, net: Decimal, tax: Decimal) {
        match side {
            Side::Sales => {
                self.net_sales += net;
                self.output_tax += tax;
            }
            Side::Purchases => {
                self.net_purchases += net;
                self.input_tax += tax;
            }
        }
    }
}

/// Output tax from `invoices` less input tax from `bills` dated in `range`.
///
/// Lines without a tax code count towards the net totals only. Documents
/// outside the range are not inspected.
pub fn tax_return(
    invoices: &[TaxDocument],
    bills: &[TaxDocument],
    tax_codes: &[TaxCode],
    range: &DateRange,
) -> CoreResult<TaxReturn> {
    let mut codes: HashMap<&str, &TaxCode> = HashMap::with_capacity(tax_codes.len());
    for code in tax_codes {
        if codes.insert(code.id.as_str(), code).is_some() {
            return Err(CoreError::DuplicateTaxCode {
                id: code.id.clone(),
            });
        }
    }

    let mut totals = Totals::default();
    let mut by_code: BTreeMap<&str, Totals> = BTreeMap::new();

    let documents = invoices
        .iter()
        .map(|doc| (Side::Sales, doc))
        .chain(bills.iter().map(|doc| (Side::Purchases, doc)));

    let mut counted = 0usize;
    for (side, doc) in documents {
        if !range.contains(&doc.date) {
            continue;
        }
        counted += 1;
        for line in &doc.lines {
            let net = line.line_total();
            let Some(code_id) = line.tax_code_id.as_deref() else {
                totals.add(side, net, Decimal::ZERO);
                continue;
            };
            let code = codes
                .get(code_id)
                .ok_or_else(|| CoreError::UnknownTaxCode {
                    document_id: doc.id.clone(),
                    tax_code_id: code_id.to_string(),
                })?;
            let tax = net * code.rate;
            totals.add(side, net, tax);
            by_code.entry(code.id.as_str()).or_default().add(side, net, tax);
        }
    }
    log::debug!(
        "Tax return for {}: {} documents in range",
        range.description(),
        counted
    );

    let by_tax_code = by_code
        .into_iter()
        .filter_map(|(id, t)| {
            codes.get(id).map(|code| TaxCodeSummary {
                tax_code_id: code.id.clone(),
                name: code.name.clone(),
                rate: code.rate,
                net_sales: t.net_sales,
                output_tax: t.output_tax,
                net_purchases: t.net_purchases,
                input_tax: t.input_tax,
            })
        })
        .collect();

    Ok(TaxReturn {
        period: *range,
        net_sales: totals.net_sales,
        output_tax: totals.output_tax,
        net_purchases: totals.net_purchases,
        input_tax: totals.input_tax,
        net_vat_payable: totals.output_tax - totals.input_tax,
        by_tax_code,
    })
}
