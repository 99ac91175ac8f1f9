/// Splits raw input into seed URLs, one per line, trimmed.
///
/// Blank lines are kept as empty seeds unless `skip_blank` is set.
pub fn parse_seed_lines(raw: &str, skip_blank: bool) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !(skip_blank && line.is_empty()))
        .map(str::to_string)
        .collect()
}
