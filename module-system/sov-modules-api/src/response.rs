/// Response type for the `Module::call` method.
///
/// Events emitted by a call are recorded on the `WorkingSet`, not here.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}
