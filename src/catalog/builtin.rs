//! Built-in application catalog.
//!
//! The defaults cover the toolchains commonly installed side by side on a
//! shared development machine: CUDA releases under `/usr/local`, the Nsight
//! profilers under `/opt/nvidia`, versioned gcc/clang packages in
//! `/usr/bin`, and cmake tarball installs under `~/bin/cmake`. A
//! `catalog.yml` at the installation root replaces this table entirely.

use super::schema::{Application, Catalog, Dependency, ModuleTemplate, VarAssignment};

/// Build the built-in catalog.
pub fn builtin_catalog() -> Catalog {
    Catalog {
        applications: vec![
            cuda(),
            nsight_systems(),
            nsight_compute(),
            gcc(),
            cmake(),
            clang(),
        ],
    }
}

fn cuda() -> Application {
    Application {
        name: "CUDA".into(),
        dependencies: vec![Dependency {
            name: "cuda".into(),
            search_dir: "/usr/local".into(),
            pattern: r"^cuda-([0-9]+\.[0-9]+)$".into(),
            symlink_required: false,
            optional: false,
        }],
        module: ModuleTemplate {
            required: true,
            whatis: Some("Adds CUDA compiler and library paths".into()),
            family: Some("CUDA".into()),
            prepend_path: vec![
                VarAssignment::new("PATH", "/usr/local/cuda-{version}/bin"),
                VarAssignment::new("LD_LIBRARY_PATH", "/usr/local/cuda-{version}/lib:"),
                VarAssignment::new("LD_LIBRARY_PATH", "/usr/local/cuda-{version}/lib64:"),
            ],
            setenv: vec![VarAssignment::new("CUDA_PATH", "/usr/local/cuda-{version}")],
        },
    }
}

fn nsight_systems() -> Application {
    Application {
        name: "nsight-systems".into(),
        dependencies: vec![Dependency {
            name: "nsys".into(),
            search_dir: "/opt/nvidia/nsight-systems".into(),
            pattern: r"^([0-9]{4}\.[0-9]+\.[0-9]+)$".into(),
            symlink_required: false,
            optional: false,
        }],
        module: ModuleTemplate {
            required: true,
            whatis: Some("Nsight Systems".into()),
            family: Some("nsys".into()),
            prepend_path: vec![VarAssignment::new(
                "PATH",
                "/opt/nvidia/nsight-systems/{version}/bin",
            )],
            setenv: vec![],
        },
    }
}

fn nsight_compute() -> Application {
    Application {
        name: "nsight-compute".into(),
        dependencies: vec![Dependency {
            name: "ncu".into(),
            search_dir: "/opt/nvidia/nsight-compute".into(),
            pattern: r"^([0-9]{4}\.[0-9]+\.[0-9]+)$".into(),
            symlink_required: false,
            optional: false,
        }],
        module: ModuleTemplate {
            required: true,
            whatis: Some("Nsight Compute".into()),
            family: Some("ncu".into()),
            prepend_path: vec![VarAssignment::new(
                "PATH",
                "/opt/nvidia/nsight-compute/{version}",
            )],
            setenv: vec![],
        },
    }
}

fn gcc() -> Application {
    let bin_dep = |name: &str, pattern: &str| Dependency {
        name: name.into(),
        search_dir: "/usr/bin".into(),
        pattern: pattern.into(),
        symlink_required: true,
        optional: false,
    };
    Application {
        name: "gcc".into(),
        dependencies: vec![
            bin_dep("gcc", r"^gcc-([0-9]+)$"),
            bin_dep("g++", r"^g\+\+-([0-9]+)$"),
            bin_dep("gfortran", r"^gfortran-([0-9]+)$"),
        ],
        module: ModuleTemplate {
            required: true,
            whatis: Some("Adds GCC toolchain to the path".into()),
            family: Some("GCC".into()),
            prepend_path: vec![VarAssignment::new("PATH", "{symlink_dir}")],
            setenv: vec![
                VarAssignment::new("CC", "gcc"),
                VarAssignment::new("CXX", "g++"),
                VarAssignment::new("CUDAHOSTCXX", "g++"),
            ],
        },
    }
}

fn cmake() -> Application {
    Application {
        name: "cmake".into(),
        dependencies: vec![Dependency {
            name: "cmake".into(),
            search_dir: "~/bin/cmake".into(),
            pattern: r"^cmake-([0-9]+\.[0-9]+\.[0-9]+)-Linux-x86_64$".into(),
            symlink_required: false,
            optional: false,
        }],
        module: ModuleTemplate {
            required: true,
            whatis: Some("Adds cmake to the path".into()),
            family: Some("cmake".into()),
            prepend_path: vec![
                VarAssignment::new("PATH", "~/bin/cmake/{version}-Linux-x86_64/bin"),
                VarAssignment::new("MANPATH", "~/bin/cmake/{version}-Linux-x86_64/man"),
            ],
            setenv: vec![],
        },
    }
}

fn clang() -> Application {
    let tool = |name: &str, pattern: &str, optional: bool| Dependency {
        name: name.into(),
        search_dir: "/usr/bin".into(),
        pattern: pattern.into(),
        symlink_required: true,
        optional,
    };
    Application {
        name: "clang".into(),
        dependencies: vec![
            tool("clang", r"^clang-([0-9]+)$", false),
            tool("clang++", r"^clang\+\+-([0-9]+)$", false),
            tool("clang-tidy", r"^clang-tidy-([0-9]+)$", true),
            tool("clang-check", r"^clang-check-([0-9]+)$", true),
            tool("clang-format", r"^clang-format-([0-9]+)$", true),
            tool("run-clang-tidy", r"^run-clang-tidy-([0-9]+)$", true),
        ],
        module: ModuleTemplate {
            required: true,
            whatis: Some("Adds installed components of the Clang toolchain to the path".into()),
            family: Some("clang".into()),
            prepend_path: vec![VarAssignment::new("PATH", "{symlink_dir}")],
            setenv: vec![
                VarAssignment::new("CC", "clang"),
                VarAssignment::new("CXX", "clang"),
                VarAssignment::new("CUDAHOSTCXX", "clang"),
            ],
        },
    }
}
