// ShotLog - SPIFFS Mount
//
// Registers the `spiffs` data partition with the VFS so the event log can
// use plain `std::fs` paths under the base path.

use std::ffi::CString;

use esp_idf_sys::{esp, esp_spiffs_info, esp_vfs_spiffs_conf_t, esp_vfs_spiffs_register};

/// Mount (formatting on first use) and log the partition usage.
pub fn mount(base_path: &str, max_files: usize) -> anyhow::Result<()> {
    // SPIFFS copies the base path; the CString only needs to outlive the call.
    let base = CString::new(base_path)?;
    let conf = esp_vfs_spiffs_conf_t {
        base_path: base.as_ptr(),
        partition_label: core::ptr::null(),
        max_files,
        format_if_mount_failed: true,
    };
    esp!(unsafe { esp_vfs_spiffs_register(&conf) })?;

    let mut total = 0usize;
    let mut used = 0usize;
    esp!(unsafe { esp_spiffs_info(core::ptr::null(), &mut total, &mut used) })?;
    log::info!("SPIFFS mounted at {} ({} of {} bytes used)", base_path, used, total);

    Ok(())
}
