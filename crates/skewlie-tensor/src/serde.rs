use crate::{tensor::get_strides_from_shape, Tensor};

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T, const N: usize> serde::Serialize for Tensor<T, N>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Tensor", 2)?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("shape", &self.shape.to_vec())?;
        state.end()
    }
}

impl<'de, T, const N: usize> serde::Deserialize<'de> for Tensor<T, N>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TensorData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
        }

        let TensorData { data, shape } = TensorData::deserialize(deserializer)?;

        let shape: [usize; N] = shape
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid shape"))?;

        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(serde::de::Error::custom(format!(
                "Shape {:?} expects {} elements, got {}",
                shape,
                numel,
                data.len()
            )));
        }

        Ok(Self {
            data,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Tensor2;

    #[test]
    fn json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let t = Tensor2::<f64>::from_shape_vec([2, 2], vec![0.0, -1.5, 1.5, 0.0])?;
        let json = serde_json::to_string(&t)?;
        let back: Tensor2<f64> = serde_json::from_str(&json)?;
        assert_eq!(back, t);
        Ok(())
    }

    #[test]
    fn json_rejects_wrong_rank() {
        let res: Result<Tensor2<f64>, _> = serde_json::from_str(r#"{"data":[1.0],"shape":[1]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn json_rejects_wrong_length() {
        let res: Result<Tensor2<f64>, _> =
            serde_json::from_str(r#"{"data":[1.0,2.0],"shape":[2,2]}"#);
        assert!(res.is_err());
    }
}
