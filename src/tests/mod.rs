mod errors;

use crate::{error::ScanError, Scanner, Token};

///
/// Drains a scanner, failing on the first scan error.
///
pub(crate) fn drain<'s>(scanner: Scanner<'_, 's>) -> Result<Vec<Token<'s>>, ScanError> {
    scanner.collect()
}

///
/// Token kinds of a whole scan.
///
pub(crate) fn kinds(scanner: Scanner<'_, '_>) -> Result<Vec<String>, ScanError> {
    scanner
        .map(|token| token.map(|t| t.kind.to_string()))
        .collect()
}
