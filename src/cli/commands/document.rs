use std::str::FromStr;

use rust_decimal::Decimal;

use crate::cli::core::{usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::document::{to_cents, Document, DocumentKind, DocumentLine, PaymentMode};

const DOC_USAGE: &str = "doc <new|pay|line|remove|show|clear> ...";
const NEW_USAGE: &str = "doc new <invoice|delivery|proforma> [number]";
const PAY_USAGE: &str = "doc pay <cash|cheque>";
const LINE_USAGE: &str = "doc line <article> <qty> <unit price> <vat %>";
const REMOVE_USAGE: &str = "doc remove <article>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "doc",
        "Build a document and compute its totals",
        DOC_USAGE,
        cmd_doc,
    )]
}

fn cmd_doc(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage_error(DOC_USAGE));
    };
    match action.to_lowercase().as_str() {
        "new" => doc_new(context, rest),
        "pay" => doc_pay(context, rest),
        "line" => doc_line(context, rest),
        "remove" => doc_remove(context, rest),
        "show" => doc_show(context),
        "clear" => {
            context.document = None;
            output::success("Document discarded.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown doc action `{}`; {}",
            other, DOC_USAGE
        ))),
    }
}

fn doc_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, number) = match args {
        [kind] => (*kind, "1"),
        [kind, number] => (*kind, *number),
        _ => return Err(usage_error(NEW_USAGE)),
    };
    let kind = DocumentKind::from_str(kind)?;
    let document = Document::new(number, kind);
    output::success(format!("{} {} opened.", document.kind, document.number));
    context.document = Some(document);
    Ok(())
}

fn doc_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [mode] = args else {
        return Err(usage_error(PAY_USAGE));
    };
    let mode = PaymentMode::from_str(mode)?;
    current(context)?.set_payment(mode);
    output::success(format!("Payment mode set to {}.", mode));
    Ok(())
}

fn doc_line(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [article, quantity, price, vat] = args else {
        return Err(usage_error(LINE_USAGE));
    };
    let line = DocumentLine::new(
        *article,
        parse_decimal("quantity", quantity)?,
        parse_decimal("unit price", price)?,
        parse_decimal("vat", vat.trim_end_matches('%'))?,
    )?;
    let total = to_cents(line.line_total()?);
    current(context)?.upsert_line(line);
    output::success(format!("Line `{}` recorded ({}).", article, total));
    Ok(())
}

fn doc_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [article] = args else {
        return Err(usage_error(REMOVE_USAGE));
    };
    match current(context)?.remove_line(article) {
        Some(_) => output::success(format!("Line `{}` removed.", article)),
        None => output::warning(format!("No line for article `{}`.", article)),
    }
    Ok(())
}

fn doc_show(context: &mut ShellContext) -> CommandResult {
    let document = context.document.as_ref().ok_or(CommandError::NoDocument)?;
    let totals = document.totals(&context.config.stamp_duty)?;

    output::section(format!(
        "{} {} ({})",
        document.kind, document.number, document.payment
    ));
    if document.is_empty() {
        output::info("No lines yet.");
    }
    for line in document.lines() {
        output::plain(format!(
            "  {:<12} {:>10} x {:>12}  TVA {:>5}%  = {:>14}",
            line.article,
            line.quantity.normalize(),
            to_cents(line.unit_price),
            line.vat_rate.normalize(),
            to_cents(line.line_total()?)
        ));
    }
    output::key_values([
        ("Total HT", totals.net.to_string()),
        ("TVA", totals.vat.to_string()),
        ("Timbre", totals.stamp.to_string()),
        ("Total TTC", totals.gross.to_string()),
    ]);
    output::plain(totals.spell(&context.speller));
    Ok(())
}

fn current(context: &mut ShellContext) -> Result<&mut Document, CommandError> {
    context.document.as_mut().ok_or(CommandError::NoDocument)
}

fn parse_decimal(label: &str, raw: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(&raw.replace(',', ".")).map_err(|_| {
        CommandError::InvalidArguments(format!("{} expects a number, got `{}`", label, raw))
    })
}
