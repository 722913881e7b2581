//! 集成测试共用的 jar 构造工具

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;

/// 在 `dir` 下写一个 jar，条目按给定顺序写入
pub fn write_jar(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (entry, content) in entries {
        writer.start_file(*entry, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// 写一个不是 zip 的 “jar”
pub fn write_corrupt_jar(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"PK\x03\x04 truncated garbage").unwrap();
    path
}

pub fn lang_entry(mod_id: &str, lang: &str) -> String {
    format!("assets/{}/lang/{}.json", mod_id, lang)
}

/// 目录下的文件名（排序后）
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

/// 手工构造的 stored 条目，用来写出 `ZipWriter` 不会产生的头部
pub struct RawEntry<'a> {
    pub name: &'a str,
    pub content: &'a [u8],
    /// 在中央目录中标记为加密
    pub encrypted: bool,
    /// 通过 zip64 扩展字段声明的解压大小（与真实大小无关）
    pub declared_size: Option<u64>,
}

impl<'a> RawEntry<'a> {
    pub fn plain(name: &'a str, content: &'a str) -> Self {
        Self {
            name,
            content: content.as_bytes(),
            encrypted: false,
            declared_size: None,
        }
    }
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// 逐字节写出一个只含 stored 条目的 jar
pub fn write_raw_jar(dir: &Path, name: &str, entries: &[RawEntry]) -> PathBuf {
    const DOS_DATE: u16 = 33; // 1980-01-01

    let mut body = Vec::new();
    let mut central = Vec::new();

    for entry in entries {
        let offset = body.len() as u32;
        let crc = crc32(entry.content);
        let size = entry.content.len() as u32;
        let flags: u16 = if entry.encrypted { 1 } else { 0 };

        body.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        body.extend_from_slice(&20u16.to_le_bytes());
        body.extend_from_slice(&flags.to_le_bytes());
        body.extend_from_slice(&0u16.to_le_bytes()); // stored
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&DOS_DATE.to_le_bytes());
        body.extend_from_slice(&crc.to_le_bytes());
        body.extend_from_slice(&size.to_le_bytes());
        body.extend_from_slice(&size.to_le_bytes());
        body.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(entry.name.as_bytes());
        body.extend_from_slice(entry.content);

        let mut extra = Vec::new();
        let uncompressed = match entry.declared_size {
            Some(declared) => {
                extra.extend_from_slice(&0x0001u16.to_le_bytes());
                extra.extend_from_slice(&8u16.to_le_bytes());
                extra.extend_from_slice(&declared.to_le_bytes());
                u32::MAX
            }
            None => size,
        };

        central.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        central.extend_from_slice(&45u16.to_le_bytes());
        central.extend_from_slice(&45u16.to_le_bytes());
        central.extend_from_slice(&flags.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&DOS_DATE.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&size.to_le_bytes());
        central.extend_from_slice(&uncompressed.to_le_bytes());
        central.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        central.extend_from_slice(&(extra.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
        central.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(entry.name.as_bytes());
        central.extend_from_slice(&extra);
    }

    let central_offset = body.len() as u32;
    let count = entries.len() as u16;
    body.extend_from_slice(&central);
    body.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());
    body.extend_from_slice(&count.to_le_bytes());
    body.extend_from_slice(&count.to_le_bytes());
    body.extend_from_slice(&(central.len() as u32).to_le_bytes());
    body.extend_from_slice(&central_offset.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes());

    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}
