/*
 * Read-only queries over a built `FrequencyTable`. The engine borrows the
 * table, so it cannot outlive or mutate the tally it answers from.
 */
use super::frequency_table::FrequencyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(usize),
    NotFound,
}

pub struct QueryEngine<'a> {
    table: &'a FrequencyTable,
}

impl<'a> QueryEngine<'a> {
    pub fn new(table: &'a FrequencyTable) -> Self {
        QueryEngine { table }
    }

    /*
     * Exact, case-sensitive lookup. The name is not trimmed, so surrounding
     * whitespace makes a name miss.
     */
    pub fn lookup(&self, name: &str) -> LookupOutcome {
        match self.table.get(name) {
            Some(count) => LookupOutcome::Found(count),
            None => LookupOutcome::NotFound,
        }
    }

    pub fn list_all(&self) -> Vec<(&'a str, usize)> {
        self.table.iter().collect()
    }
}
