use std::str::FromStr;

use rust_decimal::Decimal;
use tl::{HTMLTag, Parser};
use tracing::debug;

use crate::{models::RawQuoteRow, schema::PageSchema, AppError, Result};

/// Разбирает таблицу курсов со страницы банка.
/// Порядок строк совпадает с порядком на странице.
pub fn extract(html: &str, schema: &PageSchema) -> Result<Vec<RawQuoteRow>> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|e| AppError::MalformedPage(e.to_string()))?;
    let parser = dom.parser();
    let containers = dom
        .query_selector(schema.row_container)
        .ok_or_else(|| {
            AppError::MalformedPage(format!("invalid selector '{}'", schema.row_container))
        })?
        .filter_map(|h| h.get(parser).and_then(|n| n.as_tag()))
        .collect::<Vec<_>>();
    if containers.is_empty() {
        return Err(AppError::MalformedPage(format!(
            "no <{}> found on page",
            schema.row_container
        )));
    }
    let mut result = Vec::new();
    let rows = containers
        .into_iter()
        .flat_map(|c| element_children(c, parser))
        .filter(|t| t.name().as_utf8_str().eq_ignore_ascii_case("tr"));
    for (index, row) in rows.enumerate() {
        let quote = parse_row(row, parser, schema)
            .map_err(|reason| AppError::MalformedPage(format!("row {index}: {reason}")))?;
        debug!("{index}: {} ({})", quote.currency_name, quote.currency_code);
        result.push(quote);
    }
    Ok(result)
}

fn parse_row<'buf>(
    row: &HTMLTag<'buf>,
    parser: &Parser<'buf>,
    schema: &PageSchema,
) -> core::result::Result<RawQuoteRow, String> {
    let currency_cell = find_cell(row, parser, schema, schema.currency_label)?;
    let label = currency_cell_text(currency_cell, parser, schema)
        .ok_or_else(|| format!("'{}' cell has no currency label", schema.currency_label))?;
    let (name, code) = label
        .split_once('(')
        .ok_or_else(|| format!("currency label '{label}' has no code"))?;
    let mut builder = RawQuoteRow::builder();
    builder
        .currency_name(name.trim())
        .currency_code(code.replace(')', ""));
    let [cash_buy, cash_sell, spot_buy, spot_sell] = schema.quote_labels();
    if let Some(v) = quote_cell(row, parser, schema, cash_buy)? {
        builder.cash_buy(v);
    }
    if let Some(v) = quote_cell(row, parser, schema, cash_sell)? {
        builder.cash_sell(v);
    }
    if let Some(v) = quote_cell(row, parser, schema, spot_buy)? {
        builder.spot_buy(v);
    }
    if let Some(v) = quote_cell(row, parser, schema, spot_sell)? {
        builder.spot_sell(v);
    }
    builder.build().map_err(|e| e.to_string())
}

fn element_children<'p, 'buf>(
    tag: &HTMLTag<'buf>,
    parser: &'p Parser<'buf>,
) -> Vec<&'p HTMLTag<'buf>> {
    tag.children()
        .top()
        .iter()
        .filter_map(|h| h.get(parser).and_then(|n| n.as_tag()))
        .collect()
}

fn find_cell<'p, 'buf>(
    row: &HTMLTag<'buf>,
    parser: &'p Parser<'buf>,
    schema: &PageSchema,
    label: &str,
) -> core::result::Result<&'p HTMLTag<'buf>, String> {
    element_children(row, parser)
        .into_iter()
        .find(|cell| {
            cell.attributes()
                .get(schema.cell_attribute)
                .flatten()
                .is_some_and(|v| v.as_utf8_str().trim() == label)
        })
        .ok_or_else(|| format!("missing '{label}' cell"))
}

// "Название (КОД)" лежит в n-м элементе первого <div> ячейки
fn currency_cell_text<'buf>(
    cell: &HTMLTag<'buf>,
    parser: &Parser<'buf>,
    schema: &PageSchema,
) -> Option<String> {
    let div = element_children(cell, parser)
        .into_iter()
        .find(|t| t.name().as_utf8_str().eq_ignore_ascii_case("div"))?;
    let position = schema.currency_name_position.checked_sub(1)?;
    let children = element_children(div, parser);
    let label = children.get(position)?.inner_text(parser).trim().to_string();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

fn quote_cell<'buf>(
    row: &HTMLTag<'buf>,
    parser: &Parser<'buf>,
    schema: &PageSchema,
    label: &str,
) -> core::result::Result<Option<Decimal>, String> {
    let text = find_cell(row, parser, schema, label)?.inner_text(parser);
    parse_quote(&text, schema.unavailable_marker)
        .map_err(|_| format!("'{label}' value '{}' is not a decimal", text.trim()))
}

/// Прочерк означает, что банк не котирует валюту
pub fn parse_quote(
    text: &str,
    unavailable_marker: char,
) -> core::result::Result<Option<Decimal>, rust_decimal::Error> {
    if text.contains(unavailable_marker) {
        return Ok(None);
    }
    Decimal::from_str(text.trim()).map(Some)
}
