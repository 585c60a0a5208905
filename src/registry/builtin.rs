//! Modules available to every registry created with `Registry::builtin`.

use super::object::{Module, Object};
use std::io;
use std::path::{Path, PathBuf};

pub type GetCwd = fn() -> io::Result<PathBuf>;
pub type GetEnv = fn(&str) -> Option<String>;
pub type ListDir = fn(&Path) -> io::Result<Vec<String>>;
pub type PathJoin = fn(&Path, &Path) -> PathBuf;
pub type PathExists = fn(&Path) -> bool;

/// The `os` module: process and filesystem helpers.
pub fn os_module() -> Module {
    Module::new("os")
        .with_attr("getcwd", Object::handle(std::env::current_dir as GetCwd))
        .with_attr("getenv", Object::handle(getenv as GetEnv))
        .with_attr("listdir", Object::handle(listdir as ListDir))
        .with_attr("sep", Object::handle(std::path::MAIN_SEPARATOR_STR))
        .with_attr("path.join", Object::handle(join as PathJoin))
        .with_attr("path.exists", Object::handle(exists as PathExists))
}

fn getenv(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn listdir(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn join(base: &Path, child: &Path) -> PathBuf {
    base.join(child)
}

fn exists(path: &Path) -> bool {
    path.exists()
}
