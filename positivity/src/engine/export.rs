use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use positivity_core::PositivityError;

use super::assemble::AllMethods;
use super::ratio::CandidateTable;

/// Significant digits written for each ratio.
pub const SIGNIFICANT_DIGITS: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl AllMethods {
    /// Write the diagnostic candidate table to `path` as CSV.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be created or written.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "positivity::export",
            skip(self, path),
            fields(path = %path.as_ref().display()),
        )
    )]
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), PositivityError> {
        let file = File::create(path.as_ref())?;
        let mut out = BufWriter::new(file);
        write_csv(self.candidates(), &mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Write `table` as CSV: a `location_id,variable,<ISO dates...>` header, then
/// one line per `(region, method)` in table order.
///
/// Values use `%g`-style formatting with [`SIGNIFICANT_DIGITS`] digits and
/// missing cells are left empty.
///
/// # Errors
/// Returns `Io` if writing fails.
pub fn write_csv<W: Write>(table: &CandidateTable, mut out: W) -> Result<(), PositivityError> {
    write!(out, "location_id,variable")?;
    for date in table.axis().dates() {
        write!(out, ",{}", date.format(DATE_FORMAT))?;
    }
    writeln!(out)?;

    for (region, method, row) in table.iter() {
        write!(out, "{},{}", escape_field(region.as_str()), escape_field(method))?;
        for cell in row {
            match cell {
                Some(v) => write!(out, ",{}", format_significant(*v, SIGNIFICANT_DIGITS))?,
                None => write!(out, ",")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Format `value` like C's `%.{digits}g`.
///
/// Fixed notation is used when the decimal exponent lies in
/// `-4..digits`, scientific otherwise; trailing zeros are removed either way.
///
/// ```
/// use positivity::format_significant;
///
/// assert_eq!(format_significant(0.123456, 5), "0.12346");
/// assert_eq!(format_significant(0.5, 5), "0.5");
/// assert_eq!(format_significant(123456.0, 5), "1.2346e+05");
/// assert_eq!(format_significant(0.00001, 5), "1e-05");
/// assert_eq!(format_significant(-2.0, 5), "-2");
/// ```
#[must_use]
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let max_exp = i32::try_from(digits).unwrap_or(i32::MAX);

    if exp < -4 || exp >= max_exp {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.unsigned_abs())
    } else {
        let decimals = usize::try_from(max_exp - 1 - exp).unwrap_or(0);
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_boundaries() {
        assert_eq!(format_significant(0.0001, 5), "0.0001");
        assert_eq!(format_significant(0.000_012_345_6, 5), "1.2346e-05");
        assert_eq!(format_significant(99999.0, 5), "99999");
        assert_eq!(format_significant(99999.6, 5), "1e+05");
        assert_eq!(format_significant(0.0, 5), "0");
        assert_eq!(format_significant(1.0e120, 5), "1e+120");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(escape_field("iso1:us#iso2:us-tx"), "iso1:us#iso2:us-tx");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
