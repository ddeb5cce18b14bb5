//! Output rendering for parsed bills.

use telbill_core::StructuredBill;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV of the call detail records
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for batch output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_bill(bill: &StructuredBill, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(bill)?),
        OutputFormat::Json => Ok(serde_json::to_string(bill)?),
        OutputFormat::Csv => format_csv(bill),
        OutputFormat::Text => Ok(format_text(bill)),
    }
}

fn format_csv(bill: &StructuredBill) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "service_number",
        "timestamp",
        "destination",
        "call_type",
        "units",
        "amount",
    ])?;

    for record in &bill.call_detail_records {
        wtr.write_record([
            &record.service_number,
            &record.timestamp,
            &record.destination,
            &record.call_type,
            &record.units,
            &record.amount,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(bill: &StructuredBill) -> String {
    let mut output = String::new();

    let field = |key: &str| bill.header.get(key).map(String::as_str).unwrap_or("-");
    output.push_str(&format!("Invoice: {}\n", field("invoiceNo")));
    output.push_str(&format!("Service: {}\n", field("serviceNo")));
    output.push_str(&format!("Account: {}\n", field("accountNo")));
    output.push_str(&format!("Issued:  {}\n", field("issueDate")));
    output.push('\n');

    if !bill.address.is_empty() {
        output.push_str("Address:\n");
        output.push_str(&format!("  {}\n\n", bill.address));
    }

    if !bill.bill_cycle.period.is_empty() {
        output.push_str(&format!("Bill cycle: {}\n", bill.bill_cycle.period));
    }
    let balances = &bill.bill_cycle.balances;
    if !balances.is_empty() {
        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        output.push_str(&format!("  Previous balance:  {}\n", value(&balances.previous_balance)));
        output.push_str(&format!("  Paid:              {}\n", value(&balances.paid_amount)));
        output.push_str(&format!("  Adjustment:        {}\n", value(&balances.adjustment)));
        output.push_str(&format!("  Current charge:    {}\n", value(&balances.current_charge)));
        output.push_str(&format!("  Total outstanding: {}\n", value(&balances.total_outstanding_balance)));
        output.push_str(&format!("  Due:               {}\n", value(&balances.current_due_date)));
    }
    output.push('\n');

    for (section, rows) in &bill.charge_summary {
        output.push_str(&format!("{}:\n", section));
        for row in rows {
            output.push_str(&format!(
                "  {}  {} - {} = {}\n",
                row.service_label, row.service_charge, row.discount, row.amount
            ));
        }
    }

    if !bill.bank_payment.due_date.is_empty() {
        output.push_str(&format!("\nPayment due: {}\n", bill.bank_payment.due_date));
    }

    if !bill.call_detail_records.is_empty() {
        output.push_str("\nCalls:\n");
        output.push_str(&bill.call_detail_summary());
        output.push('\n');
    }

    output
}
