//! Device registry collaborator interface.

use parking_lot::Mutex;
use tether_protocol::{Device, DeviceId};
use tokio::sync::watch;

/// Source and sink for the registered device list.
///
/// No transactional guarantees beyond last-write-wins per id; consumers
/// treat `list` as a point-in-time snapshot.
pub trait DeviceRegistry: Send + Sync {
	/// Devices in insertion order.
	fn list(&self) -> Vec<Device>;

	/// Inserts or replaces the device with the same id.
	fn upsert(&self, device: Device);

	/// Removes the device, if present.
	fn remove(&self, id: &DeviceId);
}

/// In-memory registry publishing snapshots through a watch channel.
///
/// Upserts replace in place so list order is stable across edits; fresh
/// devices append.
pub struct MemoryRegistry {
	devices: Mutex<Vec<Device>>,
	snapshot: watch::Sender<Vec<Device>>,
}

impl MemoryRegistry {
	pub fn new() -> Self {
		let (snapshot, _) = watch::channel(Vec::new());
		Self {
			devices: Mutex::new(Vec::new()),
			snapshot,
		}
	}

	/// Subscribes to device-list snapshots.
	pub fn subscribe(&self) -> watch::Receiver<Vec<Device>> {
		self.snapshot.subscribe()
	}

	fn publish(&self, devices: &[Device]) {
		let _ = self.snapshot.send(devices.to_vec());
	}
}

impl Default for MemoryRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl DeviceRegistry for MemoryRegistry {
	fn list(&self) -> Vec<Device> {
		self.devices.lock().clone()
	}

	fn upsert(&self, device: Device) {
		let mut devices = self.devices.lock();
		match devices.iter_mut().find(|d| d.id == device.id) {
			Some(existing) => *existing = device,
			None => devices.push(device),
		}
		self.publish(&devices);
	}

	fn remove(&self, id: &DeviceId) {
		let mut devices = self.devices.lock();
		devices.retain(|d| d.id != *id);
		self.publish(&devices);
	}
}
