/// PackageEnricher port for looking up locally installed package versions
///
/// Used to fill in PyPI versions that the query output does not carry.
pub trait PackageEnricher {
    /// Returns the installed version of `package_name`, if known
    fn installed_version(&self, package_name: &str) -> Option<String>;
}
