//! Creates a small FLDAS-style directory tree for trying ClimComp.
//!
//! Layout: `fldas_sample/<year>/FLDAS_NOAH01_C_EA_M.A<year><month>.001.nc`, one
//! monthly time slice per file on a 12 x 10 grid covering 33E-44E, 3N-12N.
//!
//! ```text
//! cargo run --example create_fldas_sample
//! cargo run -- fldas_sample FLDAS Rainf_f_tavg 34.5 40.5 4.5 9.5 3 5 1987
//! ```

use ndarray::{Array1, Array3};
use netcdf::create;
use std::fs;
use std::path::Path;

const FIRST_YEAR: i32 = 1982;
const LAST_YEAR: i32 = 1991;
const NX: usize = 12;
const NY: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = Path::new("fldas_sample");
    if root.exists() {
        fs::remove_dir_all(root)?;
    }

    println!("🔨 Creating sample FLDAS tree in {}", root.display());

    for year in FIRST_YEAR..=LAST_YEAR {
        let dir = root.join(year.to_string());
        fs::create_dir_all(&dir)?;

        for month in 1..=12u32 {
            let path = dir.join(format!("FLDAS_NOAH01_C_EA_M.A{year}{month:02}.001.nc"));
            write_month(&path, year, month)?;
        }
    }

    println!(
        "✅ Wrote {} monthly files ({FIRST_YEAR}-{LAST_YEAR})",
        (LAST_YEAR - FIRST_YEAR + 1) * 12
    );
    println!("   📏 Dimensions: time(1), Y({NY}), X({NX})");
    println!("   📈 Variables: time, X, Y, Rainf_f_tavg");
    println!("\n🧪 Try it with:");
    println!("   cargo run -- fldas_sample FLDAS Rainf_f_tavg 34.5 40.5 4.5 9.5 3 5 1987");

    Ok(())
}

fn write_month(path: &Path, year: i32, month: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = create(path)?;

    file.add_attribute("title", "Synthetic FLDAS monthly sample")?;
    file.add_attribute("created_by", "create_fldas_sample.rs")?;

    file.add_dimension("time", 1)?;
    file.add_dimension("Y", NY)?;
    file.add_dimension("X", NX)?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", format!("days since {year}-{month:02}-01 00:00:00"))?;
        time_var.put_attribute("calendar", "standard")?;
        time_var.put(Array1::from(vec![0.0_f64]).view(), ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f32>("X", &["X"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        let lon: Vec<f32> = (0..NX).map(|i| 33.0 + i as f32).collect();
        lon_var.put(Array1::from(lon).view(), ..)?;
    }

    {
        let mut lat_var = file.add_variable::<f32>("Y", &["Y"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        let lat: Vec<f32> = (0..NY).map(|i| 3.0 + i as f32).collect();
        lat_var.put(Array1::from(lat).view(), ..)?;
    }

    {
        let mut rain_var = file.add_variable::<f32>("Rainf_f_tavg", &["time", "Y", "X"])?;
        rain_var.put_attribute("units", "kg m-2 s-1")?;
        rain_var.put_attribute("long_name", "total precipitation rate")?;
        rain_var.put_attribute("_FillValue", -9999.0f32)?;

        // Rainfall peaks in July; each year gets its own offset
        let season = (std::f32::consts::PI * (month as f32 - 1.0) / 6.0).cos();
        let year_offset = ((year * 7) % 5) as f32 * 0.1;

        let mut data = Vec::with_capacity(NY * NX);
        for y in 0..NY {
            for x in 0..NX {
                // Lake in the south-east corner
                if y < 2 && x >= NX - 3 {
                    data.push(-9999.0);
                } else {
                    let gradient = 0.05 * y as f32 + 0.02 * x as f32;
                    data.push((1.5 - season + year_offset + gradient) * 1e-5);
                }
            }
        }

        let array = Array3::from_shape_vec((1, NY, NX), data)?;
        rain_var.put(array.view(), ..)?;
    }

    Ok(())
}
