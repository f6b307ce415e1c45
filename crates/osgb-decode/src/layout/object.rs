use crate::decoder::Decoder;
use crate::dispatch::Family;
use crate::error::DecodeResult;
use crate::scene::ObjectId;
use crate::version;

impl Decoder<'_> {
    /// Name, data variance and user data: the layer every dispatched object
    /// starts with.
    pub(crate) fn read_object_layer(&mut self, handle: ObjectId) -> DecodeResult<()> {
        let name = self.reader.string()?;
        let data_variance = self.reader.u32()?;
        let user_data = if version::has_user_data_container(self.version()) {
            self.read_object_if_present(Family::Any)?
        } else {
            self.read_object_of(Family::Any)?
        };

        let object = self.object_mut(handle);
        object.name = name;
        object.data_variance = data_variance;
        object.user_data = user_data;
        Ok(())
    }
}
