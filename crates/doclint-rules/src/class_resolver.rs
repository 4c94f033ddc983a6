//! Resolution of exception class names for `@throws` matching.
//!
//! Names resolve by their simple name against the standard throwable
//! hierarchy and the classes declared in the file being checked.

use doclint_core::tree::{CompilationUnit, Member, TypeDecl, TypeKind};
use std::collections::HashMap;

/// Standard throwables and their superclasses.
const STANDARD_THROWABLES: &[(&str, &str)] = &[
    ("Throwable", "Object"),
    ("Exception", "Throwable"),
    ("Error", "Throwable"),
    ("RuntimeException", "Exception"),
    // java.lang
    ("ReflectiveOperationException", "Exception"),
    ("ClassNotFoundException", "ReflectiveOperationException"),
    ("IllegalAccessException", "ReflectiveOperationException"),
    ("InstantiationException", "ReflectiveOperationException"),
    ("NoSuchFieldException", "ReflectiveOperationException"),
    ("NoSuchMethodException", "ReflectiveOperationException"),
    ("CloneNotSupportedException", "Exception"),
    ("InterruptedException", "Exception"),
    ("ArithmeticException", "RuntimeException"),
    ("ArrayStoreException", "RuntimeException"),
    ("ClassCastException", "RuntimeException"),
    ("IllegalArgumentException", "RuntimeException"),
    ("NumberFormatException", "IllegalArgumentException"),
    ("IllegalMonitorStateException", "RuntimeException"),
    ("IllegalStateException", "RuntimeException"),
    ("IndexOutOfBoundsException", "RuntimeException"),
    ("ArrayIndexOutOfBoundsException", "IndexOutOfBoundsException"),
    ("StringIndexOutOfBoundsException", "IndexOutOfBoundsException"),
    ("NegativeArraySizeException", "RuntimeException"),
    ("NullPointerException", "RuntimeException"),
    ("SecurityException", "RuntimeException"),
    ("UnsupportedOperationException", "RuntimeException"),
    ("AssertionError", "Error"),
    ("LinkageError", "Error"),
    ("NoClassDefFoundError", "LinkageError"),
    ("ExceptionInInitializerError", "LinkageError"),
    ("VirtualMachineError", "Error"),
    ("OutOfMemoryError", "VirtualMachineError"),
    ("StackOverflowError", "VirtualMachineError"),
    // java.io
    ("IOException", "Exception"),
    ("FileNotFoundException", "IOException"),
    ("EOFException", "IOException"),
    ("UnsupportedEncodingException", "IOException"),
    ("CharConversionException", "IOException"),
    ("UTFDataFormatException", "IOException"),
    ("InterruptedIOException", "IOException"),
    ("ObjectStreamException", "IOException"),
    ("InvalidObjectException", "ObjectStreamException"),
    ("NotSerializableException", "ObjectStreamException"),
    ("UncheckedIOException", "RuntimeException"),
    // java.util
    ("NoSuchElementException", "RuntimeException"),
    ("InputMismatchException", "NoSuchElementException"),
    ("ConcurrentModificationException", "RuntimeException"),
    ("EmptyStackException", "RuntimeException"),
    ("MissingResourceException", "RuntimeException"),
    ("IllformedLocaleException", "RuntimeException"),
    // java.net
    ("MalformedURLException", "IOException"),
    ("UnknownHostException", "IOException"),
    ("SocketException", "IOException"),
    ("ConnectException", "SocketException"),
    ("SocketTimeoutException", "InterruptedIOException"),
    ("URISyntaxException", "Exception"),
    // java.text
    ("ParseException", "Exception"),
    // java.util.concurrent
    ("ExecutionException", "Exception"),
    ("TimeoutException", "Exception"),
    ("BrokenBarrierException", "Exception"),
    ("CancellationException", "IllegalStateException"),
    ("CompletionException", "RuntimeException"),
    ("RejectedExecutionException", "RuntimeException"),
];

/// A class known to the resolver, identified by its simple name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId<'r>(&'r str);

impl ClassId<'_> {
    /// Simple name of the class.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0
    }
}

/// Class hierarchy available to one file.
#[derive(Debug, Clone)]
pub struct ClassResolver {
    superclass: HashMap<String, String>,
}

impl ClassResolver {
    /// Builds the resolver for a file: standard throwables plus every named
    /// class the file declares.
    #[must_use]
    pub fn new(unit: &CompilationUnit) -> Self {
        let mut superclass: HashMap<String, String> = STANDARD_THROWABLES
            .iter()
            .map(|(class, parent)| ((*class).to_string(), (*parent).to_string()))
            .collect();
        superclass.insert("Object".to_string(), String::new());

        for decl in &unit.types {
            collect_classes(decl, &mut superclass);
        }
        Self { superclass }
    }

    /// Resolves a possibly qualified class name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ClassId<'_>> {
        let simple = simple_name(name);
        self.superclass
            .get_key_value(simple)
            .map(|(key, _)| ClassId(key.as_str()))
    }

    /// Returns true if `child` is `parent` or one of its subclasses.
    #[must_use]
    pub fn is_subclass(&self, child: ClassId<'_>, parent: ClassId<'_>) -> bool {
        let mut current = child.0;
        // Bounded walk: user code may declare a cycle.
        for _ in 0..=self.superclass.len() {
            if current == parent.0 {
                return true;
            }
            match self.superclass.get(current) {
                Some(next) if !next.is_empty() => current = next,
                _ => return false,
            }
        }
        false
    }

    /// Returns true for subclasses of `RuntimeException` or `Error`.
    #[must_use]
    pub fn is_unchecked(&self, class: ClassId<'_>) -> bool {
        ["RuntimeException", "Error"].into_iter().any(|root| {
            self.resolve(root)
                .is_some_and(|root| self.is_subclass(class, root))
        })
    }
}

fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn collect_classes(decl: &TypeDecl, out: &mut HashMap<String, String>) {
    if decl.kind == TypeKind::Class {
        let parent = decl
            .superclass
            .as_deref()
            .map_or("Object", simple_name)
            .to_string();
        out.insert(decl.name.clone(), parent);
    }
    for member in &decl.members {
        match member {
            Member::Type(nested) => collect_classes(nested, out),
            Member::Method(method) => {
                let statements = method.body.iter().flat_map(|b| &b.statements);
                for stmt in statements {
                    for nested in &stmt.nested_types {
                        collect_classes(nested, out);
                    }
                }
            }
            Member::StaticInit(init) => {
                for stmt in &init.body.statements {
                    for nested in &stmt.nested_types {
                        collect_classes(nested, out);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclint_core::tree::Modifiers;

    fn class(name: &str, superclass: Option<&str>) -> TypeDecl {
        TypeDecl {
            kind: TypeKind::Class,
            name: name.to_string(),
            line: 1,
            column: 0,
            end_line: 1,
            modifiers: Modifiers::default(),
            type_params: Vec::new(),
            superclass: superclass.map(str::to_string),
            members: Vec::new(),
        }
    }

    fn resolver(types: Vec<TypeDecl>) -> ClassResolver {
        ClassResolver::new(&CompilationUnit {
            types,
            comments: Vec::new(),
            line_count: 1,
        })
    }

    #[test]
    fn resolves_qualified_names() {
        let r = resolver(Vec::new());
        let io = r.resolve("java.io.IOException").expect("known");
        assert_eq!(io.name(), "IOException");
        assert_eq!(r.resolve("IOException"), Some(io));
        assert!(r.resolve("com.example.Missing").is_none());
    }

    #[test]
    fn standard_hierarchy() {
        let r = resolver(Vec::new());
        let fnf = r.resolve("FileNotFoundException").expect("known");
        let io = r.resolve("IOException").expect("known");
        assert!(r.is_subclass(fnf, io));
        assert!(!r.is_subclass(io, fnf));
        assert!(r.is_subclass(io, io));
        assert!(!r.is_unchecked(io));
        assert!(r.is_unchecked(r.resolve("NumberFormatException").expect("known")));
        assert!(r.is_unchecked(r.resolve("StackOverflowError").expect("known")));
    }

    #[test]
    fn file_classes_join_the_hierarchy() {
        let mut outer = class("Outer", None);
        outer.members.push(Member::Type(class(
            "BadInput",
            Some("java.lang.IllegalArgumentException"),
        )));
        let r = resolver(vec![outer, class("Loop", Some("Loop"))]);
        let bad = r.resolve("BadInput").expect("declared");
        assert!(r.is_unchecked(bad));
        let outer = r.resolve("Outer").expect("declared");
        assert!(!r.is_unchecked(outer));
        let looping = r.resolve("Loop").expect("declared");
        assert!(!r.is_unchecked(looping));
    }
}
