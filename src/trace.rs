//! Label-trace output
use std::io::Write;

/// Writes the label trace: a header row of observation indices, then one
/// comma-separated row of integer labels per retained sweep.
pub(crate) struct TraceWriter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> TraceWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        TraceWriter { out }
    }

    pub fn header(&mut self, n_obs: usize) -> std::io::Result<()> {
        let row: Vec<String> = (0..n_obs).map(|ix| ix.to_string()).collect();
        writeln!(self.out, "{}", row.join(","))
    }

    pub fn row(&mut self, asgn: &[usize]) -> std::io::Result<()> {
        let row: Vec<String> = asgn.iter().map(|z| z.to_string()).collect();
        writeln!(self.out, "{}", row.join(","))
    }
}
