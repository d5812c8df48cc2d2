//! 链路地址块分配
//!
//! 第 i 条链路得到 `10.1.i.0/24`。计数器只增不减，超过 256 块即报错，不回绕。

use crate::engine::AddressBlock;
use crate::error::BuildError;
use std::net::Ipv4Addr;

/// `10.1.x.0/24` 方案可用的块数
pub const MAX_BLOCKS: usize = 256;

#[derive(Debug, Default, Clone)]
pub struct AddressAllocator {
    next: usize,
}

impl AddressAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前计数器值（即已分配的块数）
    pub fn allocated(&self) -> usize {
        self.next
    }

    /// 取下一个地址块并递增计数器。
    pub fn next_block(&mut self) -> Result<AddressBlock, BuildError> {
        let index = self.next;
        let third = u8::try_from(index).map_err(|_| BuildError::AddressSpaceExhausted { index })?;
        self.next += 1;
        Ok(AddressBlock::new(Ipv4Addr::new(10, 1, third, 0)))
    }
}
