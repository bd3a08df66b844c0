use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::api::RateSource;
use crate::error::ConvertError;
use crate::models::{convert, normalize_code, parse_amount, Conversion, ConversionRequest};

pub const AMOUNT_PROMPT: &str = "Enter amount: ";
pub const FROM_PROMPT: &str = "Enter the currency to convert from (e.g., USD): ";
pub const TO_PROMPT: &str = "Enter the currency to convert to (e.g., EUR): ";

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    field: &'static str,
) -> Result<String, ConvertError> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConvertError::InputClosed { field });
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Asks for amount, source and target currency in that order.
pub fn read_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<ConversionRequest, ConvertError> {
    let amount = parse_amount(&prompt(input, output, AMOUNT_PROMPT, "the amount")?)?;
    let from = prompt(input, output, FROM_PROMPT, "the source currency")?;
    let to = prompt(input, output, TO_PROMPT, "the target currency")?;
    Ok(ConversionRequest::new(amount, &from, &to))
}

pub async fn convert_request<S: RateSource + ?Sized>(
    source: &S,
    request: ConversionRequest,
) -> Result<Conversion, ConvertError> {
    let table = source.fetch_rates(&request.from_currency).await?;
    let rate = table.rate(&request.to_currency)?;
    let converted_amount = convert(request.amount, rate);
    debug!(rate, converted_amount, "Converted amount");

    Ok(Conversion {
        request,
        rate,
        converted_amount,
    })
}

/// Interactive run: prompts, converts, prints the result line.
pub async fn run_interactive<S, R, W>(
    source: &S,
    input: &mut R,
    output: &mut W,
) -> Result<Conversion, ConvertError>
where
    S: RateSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let request = read_request(input, output)?;
    run_conversion(source, request, output).await
}

pub async fn run_conversion<S: RateSource + ?Sized, W: Write>(
    source: &S,
    request: ConversionRequest,
    output: &mut W,
) -> Result<Conversion, ConvertError> {
    info!(
        amount = request.amount,
        from = %request.from_currency,
        to = %request.to_currency,
        "Converting"
    );
    let conversion = convert_request(source, request).await?;
    writeln!(output, "{conversion}")?;
    Ok(conversion)
}

pub async fn run_list_rates<S: RateSource + ?Sized, W: Write>(
    source: &S,
    base: &str,
    output: &mut W,
) -> Result<(), ConvertError> {
    let base = normalize_code(base);
    let table = source.fetch_rates(&base).await?;

    writeln!(output, "Exchange rates for {base}:")?;
    for (currency, rate) in table.sorted() {
        writeln!(output, "{currency}: {rate}")?;
    }
    Ok(())
}
