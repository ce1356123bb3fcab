use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum OperatorSelectionMode {
    /// Automatic mode; <oper> field is ignored
    Automatic = 0,
    /// Manual operator selection; <oper> field shall be present
    Manual = 1,
    /// Manual deregister from network
    Deregister = 2,
    /// Set only <format>
    FormatOnly = 3,
    /// Manual/automatic; if manual selection fails, automatic mode is entered
    ManualAutomatic = 4,
}
