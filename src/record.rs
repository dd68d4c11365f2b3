use crate::{Error, Result};

/// Amount billed per megabyte of data transferred.
pub const RATE_PER_MB: f64 = 2.0;

/// Amount billed per minute of call time.
pub const RATE_PER_MINUTE: f64 = 60.0;

/// A single customer's billing record.
///
/// The phone number is the unique ordering key of the record within a
/// [`CustomerIndex`] and is deliberately not mutable through the public
/// surface - handing out a `&mut CustomerRecord` can therefore never
/// invalidate the index ordering.
///
/// [`CustomerIndex`]: crate::CustomerIndex
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    name: String,
    address: String,
    phone_number: String,
    call_duration_minutes: f64,
    data_usage_mb: f64,
    total_bill: f64,
}

impl CustomerRecord {
    /// Construct a record, deriving the initial bill from the usage values.
    ///
    /// The phone number must be non-empty and both usage values must be
    /// non-negative, otherwise [`Error::InvalidRecord`] is returned.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
        call_duration_minutes: f64,
        data_usage_mb: f64,
    ) -> Result<Self> {
        let total_bill = bill_for(call_duration_minutes, data_usage_mb);
        Self::from_parts(
            name,
            address,
            phone_number,
            call_duration_minutes,
            data_usage_mb,
            total_bill,
        )
    }

    /// Construct a record with an explicit outstanding balance, as read back
    /// from a snapshot (past payments mean the stored bill may be lower than
    /// the derived one).
    pub(crate) fn from_parts(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
        call_duration_minutes: f64,
        data_usage_mb: f64,
        total_bill: f64,
    ) -> Result<Self> {
        let phone_number = phone_number.into();
        if phone_number.is_empty() {
            return Err(Error::InvalidRecord("phone number"));
        }
        if !(call_duration_minutes >= 0.0) {
            return Err(Error::InvalidRecord("call duration"));
        }
        if !(data_usage_mb >= 0.0) {
            return Err(Error::InvalidRecord("data usage"));
        }
        if !(total_bill >= 0.0) {
            return Err(Error::InvalidRecord("total bill"));
        }

        Ok(Self {
            name: name.into(),
            address: address.into(),
            phone_number,
            call_duration_minutes,
            data_usage_mb,
            total_bill,
        })
    }

    /// Overwrite every non-key field, re-deriving the bill from the new
    /// usage values.
    ///
    /// Any prior payments against the old bill are forfeit - the bill is
    /// recomputed from scratch, exactly as at construction.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        call_duration_minutes: f64,
        data_usage_mb: f64,
    ) -> Result<()> {
        if !(call_duration_minutes >= 0.0) {
            return Err(Error::InvalidRecord("call duration"));
        }
        if !(data_usage_mb >= 0.0) {
            return Err(Error::InvalidRecord("data usage"));
        }

        self.name = name.into();
        self.address = address.into();
        self.call_duration_minutes = call_duration_minutes;
        self.data_usage_mb = data_usage_mb;
        self.total_bill = bill_for(call_duration_minutes, data_usage_mb);
        Ok(())
    }

    /// Apply a payment against the outstanding bill, returning the remaining
    /// balance.
    ///
    /// A negative payment, or one exceeding the outstanding balance, is
    /// rejected with [`Error::PaymentExceedsBill`] and leaves the record
    /// unchanged. Paying the exact balance leaves it at exactly 0.
    pub fn pay(&mut self, amount: f64) -> Result<f64> {
        if !(0.0..=self.total_bill).contains(&amount) {
            return Err(Error::PaymentExceedsBill {
                amount,
                balance: self.total_bill,
            });
        }

        // Clamp so float error can never leave a negative balance behind.
        self.total_bill = (self.total_bill - amount).max(0.0);
        Ok(self.total_bill)
    }

    /// The customer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The customer's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The phone number keying this record.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Total call time, in minutes.
    pub fn call_duration_minutes(&self) -> f64 {
        self.call_duration_minutes
    }

    /// Total data transferred, in megabytes.
    pub fn data_usage_mb(&self) -> f64 {
        self.data_usage_mb
    }

    /// The outstanding balance.
    pub fn total_bill(&self) -> f64 {
        self.total_bill
    }
}

/// The billing formula applied at record creation and update.
fn bill_for(call_duration_minutes: f64, data_usage_mb: f64) -> f64 {
    data_usage_mb * RATE_PER_MB + call_duration_minutes * RATE_PER_MINUTE
}
