pub mod config;
pub mod credentials;

use std::io;
use std::path::PathBuf;

/// 获取 ~/.primetask/ 目录路径
pub fn primetask_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Cannot find home directory")
        .join(".primetask")
}

/// 确保 ~/.primetask/ 目录存在
pub fn ensure_primetask_dir() -> io::Result<PathBuf> {
    let path = primetask_dir();
    std::fs::create_dir_all(&path)?;
    Ok(path)
}
