use std::collections::HashSet;

use anyhow::Result;
use goblin::mach::MachO;

/// Section holding the pointer list of classes the runtime must realize at
/// load time, typically because they implement `+load`. The name is exactly
/// 16 bytes, the Mach-O section-name limit.
pub const NON_LAZY_CLASS_LIST: &str = "__objc_nlclslist";

/// Symbol prefix the compiler emits for an Objective-C class object.
pub const CLASS_SYMBOL_PREFIX: &str = "_OBJC_CLASS_$_";

/// An Objective-C class discovered in an image, named by its class symbol.
#[derive(Debug, Clone)]
pub struct ObjcClass {
    pub name: String,
    /// Virtual address of the class object (the symbol's n_value).
    pub address: u64,
}

/// Extracts the class name from a class-object symbol, if it is one.
pub fn class_name(symbol: &str) -> Option<&str> {
    match symbol.strip_prefix(CLASS_SYMBOL_PREFIX) {
        Some(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}

/// Collects every Objective-C class defined in the image from its symbol
/// table, deduplicated and sorted by name.
///
/// `__objc_nlclslist` itself only holds raw pointers into `__objc_data`.
/// Turning those pointers into names would mean resolving virtual addresses
/// to file offsets and decoding each class_ro_t. That correlation is not
/// implemented, so callers asking "which classes implement +load" get the
/// full class list as the candidate set.
// TODO: resolve the __objc_nlclslist pointers to class objects so the report
// can stop listing every class in the image.
pub fn classes_from_symbols(macho: &MachO) -> Result<Vec<ObjcClass>> {
    let mut seen = HashSet::new();
    let mut classes = Vec::new();

    for symbol in macho.symbols() {
        let (name, nlist) = symbol?;
        // Stabs are debug records; undefined entries are classes imported
        // from other images, not defined in this one.
        if nlist.is_stab() || nlist.is_undefined() {
            continue;
        }
        let Some(class) = class_name(name) else {
            continue;
        };
        if seen.insert(class.to_string()) {
            classes.push(ObjcClass {
                name: class.to_string(),
                address: nlist.n_value,
            });
        }
    }

    classes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_strips_the_class_symbol_prefix() {
        assert_eq!(class_name("_OBJC_CLASS_$_AppDelegate"), Some("AppDelegate"));
        assert_eq!(class_name("_OBJC_CLASS_$_HomeViewController"), Some("HomeViewController"));
    }

    #[test]
    fn class_name_rejects_other_symbols() {
        assert_eq!(class_name("_main"), None);
        assert_eq!(class_name("_OBJC_METACLASS_$_AppDelegate"), None);
        assert_eq!(class_name("OBJC_CLASS_$_NoLeadingUnderscore"), None);
    }

    #[test]
    fn class_name_rejects_a_bare_prefix() {
        assert_eq!(class_name("_OBJC_CLASS_$_"), None);
    }
}
