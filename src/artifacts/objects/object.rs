use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};

/// Byte separating the type tag from the payload in a stored object
pub const TYPE_SEPARATOR: u8 = b'\0';

pub trait Packable {
    /// Encode the object payload, without the type framing
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Decode an object from its payload, without the type framing
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        hash_object(self.object_type(), &self.serialize()?)
    }
}

/// Frame a payload as `<type>\0<payload>`, the exact bytes that get stored and hashed
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let tag = object_type.as_str().as_bytes();
    let mut framed = BytesMut::with_capacity(tag.len() + 1 + payload.len());

    framed.put_slice(tag);
    framed.put_u8(TYPE_SEPARATOR);
    framed.put_slice(payload);

    framed.freeze()
}

/// Compute the object ID of a payload of the given type
pub fn hash_object(object_type: ObjectType, payload: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(frame(object_type, payload));

    ObjectId::from_digest(&hasher.finalize())
}
