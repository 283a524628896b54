//! Identifiers the generated code refers to.

/// Default namespace of the persistence runtime functions.
pub const DEFAULT_RUNTIME_NAMESPACE: &str = "panda::utils";

/// Default expression for the capacity of column storage.
pub const DEFAULT_CAPACITY: &str = "nmax_";

/// Names of variables, types and functions the generated code expects to
/// find in its surrounding class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// Namespace of `setStatus`, `setAddress`, `book` and `resetAddress`.
    pub runtime_namespace: String,
    /// Type building a persisted branch name.
    pub branch_name_type: String,
    /// Function formatting the size descriptor of array branches.
    pub format_function: String,
    /// Tree handle passed to every runtime call.
    pub tree: String,
    /// Branch selection list passed to runtime calls.
    pub branch_list: String,
    /// Flag telling `setAddress` to also set the branch status.
    pub set_status_flag: String,
    /// Name of the collection, qualifying storage and element branches.
    pub container_name: String,
    /// Name of a cached record instance.
    pub instance_name: String,
    /// Capacity of column storage.
    pub capacity: String,
    /// Per-element size descriptor prefix used when booking storage.
    pub size_prefix: String,
    /// Source object of copies and assignments.
    pub copy_source: String,
    /// Expression yielding the storage an element belongs to.
    pub store_accessor: String,
    /// Storage and index arguments of the standard element constructor.
    pub element_data: String,
    pub element_index: String,
    /// Stream and indentation used by `dump`.
    pub dump_stream: String,
    pub dump_indent: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            runtime_namespace: DEFAULT_RUNTIME_NAMESPACE.to_string(),
            branch_name_type: "BranchName".to_string(),
            format_function: "TString::Format".to_string(),
            tree: "_tree".to_string(),
            branch_list: "_branches".to_string(),
            set_status_flag: "_setStatus".to_string(),
            container_name: "_name".to_string(),
            instance_name: "name_".to_string(),
            capacity: DEFAULT_CAPACITY.to_string(),
            size_prefix: "size".to_string(),
            copy_source: "_src".to_string(),
            store_accessor: "gStore.getData(this)".to_string(),
            element_data: "_data".to_string(),
            element_index: "_idx".to_string(),
            dump_stream: "_out".to_string(),
            dump_indent: "indentation".to_string(),
        }
    }
}

impl Conventions {
    /// Create conventions with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace of the persistence runtime functions.
    pub fn with_runtime_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.runtime_namespace = namespace.into();
        self
    }

    /// Set the capacity expression used when allocating storage.
    pub fn with_capacity(mut self, capacity: impl Into<String>) -> Self {
        self.capacity = capacity.into();
        self
    }

    /// Set the collection name variable.
    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    /// Set the cached record instance name variable.
    pub fn with_instance_name(mut self, name: impl Into<String>) -> Self {
        self.instance_name = name.into();
        self
    }

    /// Fully qualified name of a runtime function.
    pub fn runtime_fn(&self, function: &str) -> String {
        if self.runtime_namespace.is_empty() {
            function.to_string()
        } else {
            format!("{}::{}", self.runtime_namespace, function)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_fn() {
        assert_eq!(Conventions::new().runtime_fn("book"), "panda::utils::book");
        assert_eq!(
            Conventions::new().with_runtime_namespace("").runtime_fn("book"),
            "book"
        );
        assert_eq!(
            Conventions::new().with_runtime_namespace("io").runtime_fn("setStatus"),
            "io::setStatus"
        );
    }
}
