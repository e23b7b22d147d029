//! Ecosystem profiles for the attribution pre-filter.
//!
//! Every supported ecosystem shares the same attribution, usage and report
//! engine. A profile only supplies what differs between them: the path
//! separator, which modules belong to the platform standard library, and
//! how relative (project-local) imports look.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source ecosystem an analysis run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// C# and F# (`using`, `open`).
    DotNet,
    /// Go modules.
    Go,
    /// Java, Kotlin and other JVM languages.
    Jvm,
    /// Python packages.
    Python,
    /// C and C++ (`#include`).
    Cpp,
    /// No standard-library knowledge; dot-separated paths.
    #[default]
    Generic,
}

/// .NET runtime namespaces and assemblies.
const DOTNET_STDLIB: &[&str] = &[
    "system",
    "microsoft.csharp",
    "microsoft.visualbasic",
    "microsoft.win32",
    "mscorlib",
    "netstandard",
    "fsharp.core",
    "microsoft.fsharp",
];

const JVM_STDLIB: &[&str] = &[
    "java",
    "javax",
    "jdk",
    "sun",
    "com.sun",
    "org.w3c.dom",
    "org.xml.sax",
    "org.ietf.jgss",
    "kotlin",
];

/// Top-level modules shipped with CPython.
const PYTHON_STDLIB: &[&str] = &[
    "__future__",
    "abc",
    "argparse",
    "array",
    "ast",
    "asyncio",
    "atexit",
    "base64",
    "bisect",
    "builtins",
    "bz2",
    "calendar",
    "cmath",
    "codecs",
    "collections",
    "concurrent",
    "configparser",
    "contextlib",
    "contextvars",
    "copy",
    "csv",
    "ctypes",
    "dataclasses",
    "datetime",
    "decimal",
    "difflib",
    "dis",
    "email",
    "enum",
    "errno",
    "faulthandler",
    "fnmatch",
    "fractions",
    "functools",
    "gc",
    "getpass",
    "gettext",
    "glob",
    "gzip",
    "hashlib",
    "heapq",
    "hmac",
    "html",
    "http",
    "importlib",
    "inspect",
    "io",
    "ipaddress",
    "itertools",
    "json",
    "keyword",
    "locale",
    "logging",
    "lzma",
    "math",
    "mimetypes",
    "multiprocessing",
    "numbers",
    "operator",
    "os",
    "pathlib",
    "pickle",
    "platform",
    "pprint",
    "queue",
    "random",
    "re",
    "secrets",
    "select",
    "shlex",
    "shutil",
    "signal",
    "socket",
    "sqlite3",
    "ssl",
    "stat",
    "statistics",
    "string",
    "struct",
    "subprocess",
    "sys",
    "sysconfig",
    "tempfile",
    "textwrap",
    "threading",
    "time",
    "timeit",
    "tkinter",
    "token",
    "tokenize",
    "traceback",
    "types",
    "typing",
    "unicodedata",
    "unittest",
    "urllib",
    "uuid",
    "venv",
    "warnings",
    "weakref",
    "xml",
    "zipfile",
    "zlib",
    "zoneinfo",
];

/// C standard and common POSIX headers.
const C_HEADERS: &[&str] = &[
    "assert.h",
    "complex.h",
    "ctype.h",
    "errno.h",
    "fenv.h",
    "float.h",
    "inttypes.h",
    "iso646.h",
    "limits.h",
    "locale.h",
    "math.h",
    "setjmp.h",
    "signal.h",
    "stdalign.h",
    "stdarg.h",
    "stdatomic.h",
    "stdbool.h",
    "stddef.h",
    "stdint.h",
    "stdio.h",
    "stdlib.h",
    "stdnoreturn.h",
    "string.h",
    "tgmath.h",
    "threads.h",
    "time.h",
    "uchar.h",
    "wchar.h",
    "wctype.h",
    "unistd.h",
    "fcntl.h",
    "pthread.h",
    "dirent.h",
    "dlfcn.h",
    "poll.h",
    "sched.h",
    "semaphore.h",
    "strings.h",
    "syslog.h",
    "termios.h",
    "windows.h",
];

/// C++ standard library headers.
const CPP_HEADERS: &[&str] = &[
    "algorithm",
    "any",
    "array",
    "atomic",
    "bitset",
    "cassert",
    "cctype",
    "cerrno",
    "cfloat",
    "chrono",
    "cinttypes",
    "climits",
    "cmath",
    "codecvt",
    "complex",
    "concepts",
    "condition_variable",
    "cstddef",
    "cstdint",
    "cstdio",
    "cstdlib",
    "cstring",
    "ctime",
    "deque",
    "exception",
    "filesystem",
    "format",
    "forward_list",
    "fstream",
    "functional",
    "future",
    "initializer_list",
    "iomanip",
    "ios",
    "iosfwd",
    "iostream",
    "istream",
    "iterator",
    "limits",
    "list",
    "locale",
    "map",
    "memory",
    "mutex",
    "new",
    "numeric",
    "optional",
    "ostream",
    "queue",
    "random",
    "ranges",
    "ratio",
    "regex",
    "set",
    "shared_mutex",
    "span",
    "sstream",
    "stack",
    "stdexcept",
    "streambuf",
    "string",
    "string_view",
    "system_error",
    "thread",
    "tuple",
    "type_traits",
    "typeindex",
    "typeinfo",
    "unordered_map",
    "unordered_set",
    "utility",
    "valarray",
    "variant",
    "vector",
];

/// Directory prefixes of system headers.
const SYSTEM_HEADER_DIRS: &[&str] = &[
    "sys", "linux", "arpa", "netinet", "net", "bits", "asm", "mach",
];

impl Ecosystem {
    /// Every ecosystem, in display order.
    pub const ALL: [Ecosystem; 6] = [
        Ecosystem::DotNet,
        Ecosystem::Go,
        Ecosystem::Jvm,
        Ecosystem::Python,
        Ecosystem::Cpp,
        Ecosystem::Generic,
    ];

    /// Primary separator between module path segments.
    pub fn separator(&self) -> char {
        match self {
            Ecosystem::Go | Ecosystem::Cpp => '/',
            Ecosystem::DotNet | Ecosystem::Jvm | Ecosystem::Python | Ecosystem::Generic => '.',
        }
    }

    /// Returns true if `module` (normalized) belongs to the platform standard library.
    pub fn is_standard_library(&self, module: &str) -> bool {
        match self {
            Ecosystem::DotNet => has_any_prefix(module, DOTNET_STDLIB, '.'),
            Ecosystem::Jvm => has_any_prefix(module, JVM_STDLIB, '.'),
            Ecosystem::Python => {
                let top = module.split('.').next().unwrap_or(module);
                PYTHON_STDLIB.contains(&top)
            }
            Ecosystem::Go => {
                // Standard packages never carry a domain in their first element.
                let first = module.split('/').next().unwrap_or(module);
                module == "c" || (!first.is_empty() && !first.contains('.'))
            }
            Ecosystem::Cpp => {
                C_HEADERS.contains(&module)
                    || CPP_HEADERS.contains(&module)
                    || module
                        .split_once('/')
                        .is_some_and(|(dir, _)| SYSTEM_HEADER_DIRS.contains(&dir))
            }
            Ecosystem::Generic => false,
        }
    }

    /// Returns true if `module` is written as a relative, project-local import.
    pub fn is_relative(&self, module: &str) -> bool {
        module.starts_with('.') || module.starts_with('/')
    }

    /// Short lowercase name.
    pub fn label(&self) -> &'static str {
        match self {
            Ecosystem::DotNet => "dotnet",
            Ecosystem::Go => "go",
            Ecosystem::Jvm => "jvm",
            Ecosystem::Python => "python",
            Ecosystem::Cpp => "cpp",
            Ecosystem::Generic => "generic",
        }
    }
}

/// Returns true if `module` equals one of `prefixes` or continues one of them with `sep`.
pub(crate) fn has_any_prefix(module: &str, prefixes: &[&str], sep: char) -> bool {
    prefixes.iter().any(|p| has_segment_prefix(module, p, sep))
}

/// Returns true if `module == prefix` or `module` starts with `prefix` followed by `sep`.
pub(crate) fn has_segment_prefix(module: &str, prefix: &str, sep: char) -> bool {
    !prefix.is_empty()
        && module
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(sep))
}

impl std::str::FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dotnet" | "csharp" | "c#" | "fsharp" | "f#" => Ok(Ecosystem::DotNet),
            "go" | "golang" => Ok(Ecosystem::Go),
            "jvm" | "java" | "kotlin" => Ok(Ecosystem::Jvm),
            "python" | "py" => Ok(Ecosystem::Python),
            "cpp" | "c++" | "c" => Ok(Ecosystem::Cpp),
            "generic" => Ok(Ecosystem::Generic),
            _ => Err(format!(
                "Unknown ecosystem: '{}'. Valid ecosystems: dotnet, go, jvm, python, cpp, generic",
                s
            )),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
