use std::fs;
use std::path::Path;

use clap::CommandFactory;

// cli.rs only needs clap and clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    let root = cli::Cli::command();
    write_page(&root, "gearloan", &man_dir);

    // One page per visible subcommand, named like `gearloan-borrow.1`.
    // Nested subcommands (config) get `gearloan-config-set.1` and so on.
    let mut pending: Vec<(String, clap::Command)> = root
        .get_subcommands()
        .filter(|sub| !sub.is_hide_set())
        .map(|sub| (format!("gearloan-{}", sub.get_name()), sub.clone()))
        .collect();

    while let Some((name, cmd)) = pending.pop() {
        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| (format!("{name}-{}", sub.get_name()), sub.clone())),
        );
        write_page(&cmd, &name, &man_dir);
    }
}

fn write_page(cmd: &clap::Command, name: &str, dir: &Path) {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone().name(name.to_owned()))
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));

    let path = dir.join(format!("{name}.1"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
