//! The flat textual snapshot format.
//!
//! A snapshot is a newline-delimited stream of labeled field lines, one
//! block per record, blocks emitted in pre-order:
//!
//! ```text
//! Name: Ada Lovelace
//! Phone Number: 5550100
//! Address: 12 Main St
//! Call Duration: 4
//! Data Usage: 100
//! Total Bill: 440
//! ----------------------------
//! ```
//!
//! Reading is lossy by design: blank lines and lines carrying no recognized
//! label are skipped, and a record is committed only once its `Total Bill:`
//! line arrives with all five preceding fields in hand. Loading therefore
//! tolerates (and silently drops) damaged blocks rather than rejecting the
//! whole stream; only an I/O failure aborts a load.
//!
//! A reloaded tree is rebuilt by repeated insertion in stream order, so its
//! shape depends only on that order - not on the shape that produced the
//! snapshot. The balance invariant holds either way.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{iter::PreOrder, record::CustomerRecord, tree::CustomerIndex, Result};

const NAME_LABEL: &str = "Name: ";
const PHONE_LABEL: &str = "Phone Number: ";
const ADDRESS_LABEL: &str = "Address: ";
const CALL_LABEL: &str = "Call Duration: ";
const DATA_LABEL: &str = "Data Usage: ";
const BILL_LABEL: &str = "Total Bill: ";
const SEPARATOR: &str = "----------------------------";

impl CustomerIndex {
    /// Write a snapshot of every record in this index to `w`, in pre-order.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        for node in self.root().into_iter().flat_map(PreOrder::new) {
            let r = node.record();
            writeln!(w, "{NAME_LABEL}{}", r.name())?;
            writeln!(w, "{PHONE_LABEL}{}", r.phone_number())?;
            writeln!(w, "{ADDRESS_LABEL}{}", r.address())?;
            writeln!(w, "{CALL_LABEL}{}", r.call_duration_minutes())?;
            writeln!(w, "{DATA_LABEL}{}", r.data_usage_mb())?;
            writeln!(w, "{BILL_LABEL}{}", r.total_bill())?;
            writeln!(w, "{SEPARATOR}")?;
        }

        w.flush()?;
        Ok(())
    }

    /// Rebuild an index from a snapshot previously produced by
    /// [`write_to()`].
    ///
    /// Damaged blocks are dropped per the module policy; a phone number
    /// appearing more than once keeps its first record. Only an I/O failure
    /// returns an error.
    ///
    /// [`write_to()`]: Self::write_to
    pub fn read_from<R: BufRead>(r: R) -> Result<Self> {
        let mut index = Self::default();
        let mut partial = PartialRecord::default();

        for line in r.lines() {
            if let Some(record) = partial.feed(&line?) {
                // Duplicates of an already-committed phone number are
                // skipped - the first record wins.
                let _ = index.insert(record);
            }
        }

        Ok(index)
    }

    /// Write a snapshot of this index to the file at `path`, creating or
    /// truncating it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Rebuild an index from the snapshot file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

/// Collects labeled field lines until a record can be committed.
#[derive(Debug, Default)]
struct PartialRecord {
    name: Option<String>,
    phone_number: Option<String>,
    address: Option<String>,
    call_duration_minutes: Option<f64>,
    data_usage_mb: Option<f64>,
}

impl PartialRecord {
    /// Feed one snapshot line, returning a committed record once a
    /// `Total Bill:` line completes one.
    ///
    /// A field line that fails to parse is skipped, as is any line carrying
    /// no recognized label. A `Total Bill:` line arriving before all other
    /// fields discards the partial record. A record that fails
    /// [`CustomerRecord`] validation (empty phone number, negative values)
    /// is likewise dropped.
    fn feed(&mut self, line: &str) -> Option<CustomerRecord> {
        if line == SEPARATOR {
            // Record boundary: any half-read fields do not leak into the
            // next block.
            *self = Self::default();
        } else if let Some(v) = line.strip_prefix(NAME_LABEL) {
            self.name = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix(PHONE_LABEL) {
            self.phone_number = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix(ADDRESS_LABEL) {
            self.address = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix(CALL_LABEL) {
            self.call_duration_minutes = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix(DATA_LABEL) {
            self.data_usage_mb = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix(BILL_LABEL) {
            let total_bill = v.trim().parse().ok()?;
            return self.commit(total_bill);
        }

        None
    }

    fn commit(&mut self, total_bill: f64) -> Option<CustomerRecord> {
        let this = std::mem::take(self);

        CustomerRecord::from_parts(
            this.name?,
            this.address?,
            this.phone_number?,
            this.call_duration_minutes?,
            this.data_usage_mb?,
            total_bill,
        )
        .ok()
    }
}
