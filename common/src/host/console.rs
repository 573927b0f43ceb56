/// Output sink of the host console (`printk` on a real kernel).
pub trait Console: Send + Sync {
    /// Write a string; line endings are already included.
    fn write_str(&self, s: &str);
}
