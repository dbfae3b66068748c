use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Write the raw payload of an object, whatever its type
    pub fn cat_file(&self, name: &str) -> Result<ObjectType> {
        let oid = self.resolve_name(name)?;
        let (object_type, payload) = self.database().load(&oid, None)?;

        let mut writer = self.writer();
        writer.write_all(&payload)?;
        writer.flush()?;

        Ok(object_type)
    }
}
