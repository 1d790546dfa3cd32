use crate::network::host::HostRecord;

/// Destination for the final, sorted record set.
///
/// Field escaping and the encoding of absent values belong to the sink.
pub trait RecordSink {
    fn write_records(&mut self, records: &[HostRecord]) -> anyhow::Result<()>;
}
