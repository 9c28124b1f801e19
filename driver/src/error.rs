use kernel::KernelError;

/// Maps a foreign error into a report whose context is the matching [`KernelError`].
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
