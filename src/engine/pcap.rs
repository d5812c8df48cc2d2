//! libpcap 抓包文件
//!
//! 点到点网卡使用 PPP 链路类型。引擎不产生逐包记录，文件只含全局头。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const PCAP_MAGIC: u32 = 0xa1b2_c3d4;
pub const LINKTYPE_PPP: u32 = 9;
pub const PCAP_HEADER_LEN: usize = 24;
const SNAPLEN: u32 = 65_535;

/// 创建（或截断）抓包文件并写入全局头；父目录不存在时一并创建。
pub fn write_capture_header(path: &Path, linktype: u32) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(&PCAP_MAGIC.to_le_bytes())?;
    w.write_all(&2u16.to_le_bytes())?;
    w.write_all(&4u16.to_le_bytes())?;
    w.write_all(&0i32.to_le_bytes())?; // thiszone
    w.write_all(&0u32.to_le_bytes())?; // sigfigs
    w.write_all(&SNAPLEN.to_le_bytes())?;
    w.write_all(&linktype.to_le_bytes())?;
    w.flush()
}
