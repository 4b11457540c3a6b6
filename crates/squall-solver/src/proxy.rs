//! Visual proxies mirroring particle positions.
//!
//! The simulation never owns render objects. A host that can create and
//! move visual stand-ins implements [`VisualProxyHost`]; a
//! [`ProxyMirror`] then keeps one proxy per particle in sync.

use squall_math::Vec3;

use crate::state::ParticleStore;

/// Capability to create and move visual stand-ins for particles.
pub trait VisualProxyHost {
    /// Host-side reference to one proxy.
    type Handle;

    /// Creates a proxy at `position`.
    fn create_proxy(&mut self, position: Vec3) -> Self::Handle;

    /// Moves an existing proxy.
    fn set_position(&mut self, handle: &Self::Handle, position: Vec3);
}

/// One proxy per particle, indexed like the particle store.
pub struct ProxyMirror<H: VisualProxyHost> {
    host: H,
    handles: Vec<H::Handle>,
}

impl<H: VisualProxyHost> ProxyMirror<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            handles: Vec::new(),
        }
    }

    /// Creates proxies for particles that do not have one yet.
    pub fn attach(&mut self, particles: &ParticleStore) {
        for &p in particles.positions.iter().skip(self.handles.len()) {
            let handle = self.host.create_proxy(p);
            self.handles.push(handle);
        }
    }

    /// Pushes current positions to every proxy, attaching new particles first.
    pub fn sync(&mut self, particles: &ParticleStore) {
        self.attach(particles);
        for (handle, &p) in self.handles.iter().zip(&particles.positions) {
            self.host.set_position(handle, p);
        }
    }

    /// Number of proxies created.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
