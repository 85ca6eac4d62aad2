use half::f16;
use oxidnn_core::{
    ActivationDescriptor, ActivationMode, Algo, ConvDescriptor, ConvMode, DType, DevicePtr,
    DevicePtrMut, Error, FilterDescriptor, Handle, Layout, NanPropagation, ScatterInput,
    ScatterReduction, Status, TensorDescriptor, Transpose, UnaryOpMode, UnaryScalar,
};

fn tensor_4d(layout: Layout, dtype: DType, n: usize, c: usize, h: usize, w: usize) -> TensorDescriptor {
    let mut desc = TensorDescriptor::new();
    desc.set_4d(layout, dtype, n, c, h, w).unwrap();
    desc
}

fn tensor_nd(dtype: DType, dims: &[usize]) -> TensorDescriptor {
    let mut desc = TensorDescriptor::new();
    desc.set_nd(dtype, dims, None).unwrap();
    desc
}

fn assert_not_implemented<T: std::fmt::Debug>(res: Result<T, Error>) {
    match &res {
        Err(Error::NotImplemented { .. }) => {}
        other => panic!("expected NotImplemented, got {other:?}"),
    }
    assert_eq!(Status::of(&res), Status::NotSupported);
}

#[test]
fn gemm_fast_path_selects_and_dispatches() {
    let handle = Handle::new();
    let a = vec![f16::ZERO; 512 * 512];
    let b = vec![f16::ZERO; 512 * 512];
    let mut c = vec![f16::ZERO; 512 * 512];

    for _ in 0..2 {
        // Identical calls select identically.
        handle
            .hgemm(
                Transpose::None,
                Transpose::None,
                512,
                512,
                512,
                1.0,
                DevicePtr::from_host(&a),
                512,
                DevicePtr::from_host(&b),
                512,
                0.0,
                DevicePtrMut::from_host_mut(&mut c),
                512,
                Algo::DEFAULT,
            )
            .unwrap();
    }

    // The hint prefers a later variant in the same table.
    handle
        .hgemm(
            Transpose::None,
            Transpose::None,
            512,
            512,
            512,
            1.0,
            DevicePtr::from_host(&a),
            512,
            DevicePtr::from_host(&b),
            512,
            0.0,
            DevicePtrMut::from_host_mut(&mut c),
            512,
            Algo::new(6).unwrap(),
        )
        .unwrap();

    handle.synchronize().unwrap();
}

#[test]
fn gemm_rejects_untiled_and_scaled_problems() {
    let handle = Handle::new();
    let a = vec![f16::ZERO; 512 * 512];
    let b = vec![f16::ZERO; 512 * 512];
    let mut c = vec![f16::ZERO; 512 * 512];
    let pa = DevicePtr::from_host(&a);
    let pb = DevicePtr::from_host(&b);
    let pc = DevicePtrMut::from_host_mut(&mut c);

    // K not a multiple of the tile quantum.
    assert_not_implemented(handle.hgemm(
        Transpose::None,
        Transpose::None,
        512,
        512,
        500,
        1.0,
        pa,
        500,
        pb,
        512,
        0.0,
        pc,
        512,
        Algo::DEFAULT,
    ));

    // Transposed operands have no registered variant.
    assert_not_implemented(handle.hgemm(
        Transpose::Trans,
        Transpose::None,
        512,
        512,
        512,
        1.0,
        pa,
        512,
        pb,
        512,
        0.0,
        pc,
        512,
        Algo::DEFAULT,
    ));

    // Non-identity scaling disqualifies the fast path.
    assert_not_implemented(handle.hgemm(
        Transpose::None,
        Transpose::None,
        512,
        512,
        512,
        1.5,
        pa,
        512,
        pb,
        512,
        0.0,
        pc,
        512,
        Algo::DEFAULT,
    ));

    // A hint past the end of the variant table is a preference the
    // selector cannot honor.
    assert_not_implemented(handle.hgemm(
        Transpose::None,
        Transpose::None,
        512,
        512,
        512,
        1.0,
        pa,
        512,
        pb,
        512,
        0.0,
        pc,
        512,
        Algo::new(9).unwrap(),
    ));

    // Null operands are parameter errors, not selection failures.
    let res = handle.hgemm(
        Transpose::None,
        Transpose::None,
        512,
        512,
        512,
        1.0,
        DevicePtr::null(),
        512,
        pb,
        512,
        0.0,
        pc,
        512,
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));
}

#[test]
fn conv_forward_pointwise_fast_path() {
    let handle = Handle::new();
    let x_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 64, 8, 8);
    let y_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 64, 8, 8);
    let mut w_desc = FilterDescriptor::new();
    w_desc.set_4d(DType::F16, Layout::Nhwc, 64, 64, 1, 1).unwrap();
    let mut conv_desc = ConvDescriptor::new();
    conv_desc
        .set_2d(0, 0, 1, 1, 1, 1, ConvMode::CrossCorrelation, DType::F32)
        .unwrap();

    let x = vec![f16::ZERO; 64 * 64];
    let w = vec![f16::ZERO; 64 * 64];
    let mut y = vec![f16::ZERO; 64 * 64];

    assert_eq!(
        handle
            .conv_forward_workspace_size(&x_desc, &w_desc, &conv_desc, &y_desc, Algo::DEFAULT)
            .unwrap(),
        0
    );

    handle
        .conv_forward(
            1.0,
            &x_desc,
            DevicePtr::from_host(&x),
            &w_desc,
            DevicePtr::from_host(&w),
            &conv_desc,
            Algo::DEFAULT,
            DevicePtrMut::null(),
            0,
            0.0,
            &y_desc,
            DevicePtrMut::from_host_mut(&mut y),
        )
        .unwrap();
    handle.synchronize().unwrap();
}

#[test]
fn conv_forward_rejects_wide_windows_and_large_working_sets() {
    let handle = Handle::new();
    let x_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 64, 8, 8);
    let y_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 64, 8, 8);
    let mut conv_desc = ConvDescriptor::new();
    conv_desc
        .set_2d(0, 0, 1, 1, 1, 1, ConvMode::CrossCorrelation, DType::F32)
        .unwrap();

    let x = vec![f16::ZERO; 64 * 32 * 32];
    let w = vec![f16::ZERO; 64 * 64 * 9];
    let mut y = vec![f16::ZERO; 64 * 32 * 32];

    // A 3x3 window has no registered pointwise variant.
    let mut w_desc = FilterDescriptor::new();
    w_desc.set_4d(DType::F16, Layout::Nhwc, 64, 64, 3, 3).unwrap();
    assert_not_implemented(handle.conv_forward(
        1.0,
        &x_desc,
        DevicePtr::from_host(&x),
        &w_desc,
        DevicePtr::from_host(&w),
        &conv_desc,
        Algo::DEFAULT,
        DevicePtrMut::null(),
        0,
        0.0,
        &y_desc,
        DevicePtrMut::from_host_mut(&mut y),
    ));

    // Pointwise, but the working set exceeds the on-chip budget.
    let x_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 64, 32, 32);
    let y_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 64, 32, 32);
    w_desc.set_4d(DType::F16, Layout::Nhwc, 64, 64, 1, 1).unwrap();
    assert_not_implemented(handle.conv_forward(
        1.0,
        &x_desc,
        DevicePtr::from_host(&x),
        &w_desc,
        DevicePtr::from_host(&w),
        &conv_desc,
        Algo::DEFAULT,
        DevicePtrMut::null(),
        0,
        0.0,
        &y_desc,
        DevicePtrMut::from_host_mut(&mut y),
    ));
}

#[test]
fn add_tensor_needs_matching_counts_and_even_totals() {
    let handle = Handle::new();
    let a = vec![f16::ZERO; 96];
    let mut c = vec![f16::ZERO; 96];
    let pa = DevicePtr::from_host(&a);
    let pc = DevicePtrMut::from_host_mut(&mut c);

    let a_desc = tensor_4d(Layout::Nchw, DType::F16, 2, 3, 4, 4);
    let c_desc = tensor_4d(Layout::Nchw, DType::F16, 2, 3, 4, 4);
    handle
        .add_tensor(1.0, &a_desc, pa, 0.0, &c_desc, pc, Algo::DEFAULT)
        .unwrap();
    handle.synchronize().unwrap();

    // 1*1*1*3 elements: odd totals fall outside the paired f16 kernels.
    let a_desc = tensor_4d(Layout::Nchw, DType::F16, 1, 1, 1, 3);
    let c_desc = tensor_4d(Layout::Nchw, DType::F16, 1, 1, 1, 3);
    assert_not_implemented(handle.add_tensor(1.0, &a_desc, pa, 0.0, &c_desc, pc, Algo::DEFAULT));

    // Mismatched flattened extents.
    let a_desc = tensor_4d(Layout::Nchw, DType::F16, 2, 3, 4, 4);
    let c_desc = tensor_4d(Layout::Nchw, DType::F16, 1, 3, 4, 4);
    assert_not_implemented(handle.add_tensor(1.0, &a_desc, pa, 0.0, &c_desc, pc, Algo::DEFAULT));

    // No f32 variant is registered.
    let a_desc = tensor_4d(Layout::Nchw, DType::F32, 2, 3, 4, 4);
    let c_desc = tensor_4d(Layout::Nchw, DType::F32, 2, 3, 4, 4);
    assert_not_implemented(handle.add_tensor(1.0, &a_desc, pa, 0.0, &c_desc, pc, Algo::DEFAULT));
}

#[test]
fn scale_tensor_is_f32_only_at_the_interface() {
    let handle = Handle::new();
    let mut y = vec![0f32; 24];
    let y_desc = tensor_nd(DType::F32, &[2, 3, 4]);
    handle
        .scale_tensor(&y_desc, DevicePtrMut::from_host_mut(&mut y), 0.5, Algo::DEFAULT)
        .unwrap();
    handle.synchronize().unwrap();

    let mut y16 = vec![f16::ZERO; 24];
    let y_desc = tensor_nd(DType::F16, &[2, 3, 4]);
    let res = handle.scale_tensor(
        &y_desc,
        DevicePtrMut::from_host_mut(&mut y16),
        0.5,
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::NotSupported(_))));
    assert_eq!(Status::of(&res), Status::NotSupported);
}

#[test]
fn unary_ops_key_on_the_dtype_pair_and_ignore_the_hint() {
    let handle = Handle::new();
    let x = vec![0f32; 12];
    let mut y = vec![0f32; 12];
    let x_desc = tensor_nd(DType::F32, &[3, 4]);
    let y_desc = tensor_nd(DType::F32, &[3, 4]);

    handle
        .unary_op(
            UnaryOpMode::AddScalar,
            UnaryScalar::F32(2.5),
            &x_desc,
            DevicePtr::from_host(&x),
            &y_desc,
            DevicePtrMut::from_host_mut(&mut y),
            Algo::DEFAULT,
        )
        .unwrap();

    // The hint is not consulted for this operation.
    handle
        .unary_op(
            UnaryOpMode::MulScalar,
            UnaryScalar::F32(2.5),
            &x_desc,
            DevicePtr::from_host(&x),
            &y_desc,
            DevicePtrMut::from_host_mut(&mut y),
            Algo::new(5).unwrap(),
        )
        .unwrap();

    let xi = vec![0i32; 12];
    let mut yi = vec![0i32; 12];
    let xi_desc = tensor_nd(DType::I32, &[3, 4]);
    let yi_desc = tensor_nd(DType::I32, &[3, 4]);
    handle
        .unary_op(
            UnaryOpMode::MulScalar,
            UnaryScalar::I32(3),
            &xi_desc,
            DevicePtr::from_host(&xi),
            &yi_desc,
            DevicePtrMut::from_host_mut(&mut yi),
            Algo::DEFAULT,
        )
        .unwrap();

    // Mixed pairs have no registered variant.
    assert_not_implemented(handle.unary_op(
        UnaryOpMode::AddScalar,
        UnaryScalar::F32(1.0),
        &x_desc,
        DevicePtr::from_host(&x),
        &yi_desc,
        DevicePtrMut::from_host_mut(&mut yi),
        Algo::DEFAULT,
    ));
    handle.synchronize().unwrap();
}

#[test]
fn activation_passes_are_half_precision_only() {
    let handle = Handle::new();
    let mut act = ActivationDescriptor::new();
    act.set(ActivationMode::Silu, NanPropagation::NotPropagate, 0.0);

    let x = vec![f16::ZERO; 32];
    let mut y = vec![f16::ZERO; 32];
    let mut dx = vec![f16::ZERO; 32];
    let dy = vec![f16::ZERO; 32];
    let x_desc = tensor_4d(Layout::Nhwc, DType::F16, 1, 2, 4, 4);

    handle
        .activation_forward(
            &act,
            1.0,
            &x_desc,
            DevicePtr::from_host(&x),
            0.0,
            &x_desc,
            DevicePtrMut::from_host_mut(&mut y),
            Algo::DEFAULT,
        )
        .unwrap();

    handle
        .activation_backward(
            &act,
            1.0,
            &x_desc,
            DevicePtr::from_host(&x),
            &x_desc,
            DevicePtr::from_host(&dy),
            &x_desc,
            DevicePtr::from_host(&x),
            0.0,
            &x_desc,
            DevicePtrMut::from_host_mut(&mut dx),
            Algo::DEFAULT,
        )
        .unwrap();
    handle.synchronize().unwrap();

    let xf = vec![0f32; 32];
    let mut yf = vec![0f32; 32];
    let f32_desc = tensor_4d(Layout::Nhwc, DType::F32, 1, 2, 4, 4);
    assert_not_implemented(handle.activation_forward(
        &act,
        1.0,
        &f32_desc,
        DevicePtr::from_host(&xf),
        0.0,
        &f32_desc,
        DevicePtrMut::from_host_mut(&mut yf),
        Algo::DEFAULT,
    ));
}

#[test]
fn arg_max_validates_the_axis_before_selection() {
    let handle = Handle::new();
    let x = vec![f16::ZERO; 64];
    let mut y = vec![0i64; 8];
    let x_desc = tensor_nd(DType::F16, &[2, 8, 4]);
    let y_desc = tensor_nd(DType::I64, &[2, 4]);

    handle
        .arg_max(
            1,
            &x_desc,
            DevicePtr::from_host(&x),
            &y_desc,
            DevicePtrMut::from_host_mut(&mut y),
            Algo::DEFAULT,
        )
        .unwrap();
    handle.synchronize().unwrap();

    let res = handle.arg_max(
        3,
        &x_desc,
        DevicePtr::from_host(&x),
        &y_desc,
        DevicePtrMut::from_host_mut(&mut y),
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));

    let xf = vec![0f32; 64];
    let xf_desc = tensor_nd(DType::F32, &[2, 8, 4]);
    assert_not_implemented(handle.arg_max(
        1,
        &xf_desc,
        DevicePtr::from_host(&xf),
        &y_desc,
        DevicePtrMut::from_host_mut(&mut y),
        Algo::DEFAULT,
    ));
}

#[test]
fn masked_fill_pads_short_masks_and_rejects_long_ones() {
    let handle = Handle::new();
    let input = vec![0f32; 24];
    let mask = vec![0u8; 12];
    let mut output = vec![0f32; 24];
    let input_desc = tensor_nd(DType::F32, &[2, 3, 4]);
    let mask_desc = tensor_nd(DType::U8, &[3, 4]);
    let output_desc = tensor_nd(DType::F32, &[2, 3, 4]);

    handle
        .masked_fill(
            7.0,
            &input_desc,
            DevicePtr::from_host(&input),
            &mask_desc,
            DevicePtr::from_host(&mask),
            &output_desc,
            DevicePtrMut::from_host_mut(&mut output),
            Algo::DEFAULT,
        )
        .unwrap();
    handle.synchronize().unwrap();

    let long_mask_desc = tensor_nd(DType::U8, &[2, 2, 3, 4]);
    let res = handle.masked_fill(
        7.0,
        &input_desc,
        DevicePtr::from_host(&input),
        &long_mask_desc,
        DevicePtr::from_host(&mask),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));
}

#[test]
fn masked_select_disqualifies_any_broadcast() {
    let handle = Handle::new();
    let input = vec![0i32; 24];
    let mask = vec![0u8; 24];
    let mut output = vec![0i32; 24];
    let mut count = vec![0i32; 1];
    let input_desc = tensor_nd(DType::I32, &[2, 3, 4]);

    handle
        .masked_select(
            &input_desc,
            DevicePtr::from_host(&input),
            &tensor_nd(DType::U8, &[2, 3, 4]),
            DevicePtr::from_host(&mask),
            DevicePtrMut::from_host_mut(&mut output),
            DevicePtrMut::from_host_mut(&mut count),
            Algo::DEFAULT,
        )
        .unwrap();
    handle.synchronize().unwrap();

    // A broadcast mask shape disqualifies the single compaction kernel.
    assert_not_implemented(handle.masked_select(
        &input_desc,
        DevicePtr::from_host(&input),
        &tensor_nd(DType::U8, &[2, 1, 4]),
        DevicePtr::from_host(&mask),
        DevicePtrMut::from_host_mut(&mut output),
        DevicePtrMut::from_host_mut(&mut count),
        Algo::DEFAULT,
    ));

    // Incompatible shapes violate the broadcast rule outright.
    let res = handle.masked_select(
        &input_desc,
        DevicePtr::from_host(&input),
        &tensor_nd(DType::U8, &[2, 5, 4]),
        DevicePtr::from_host(&mask),
        DevicePtrMut::from_host_mut(&mut output),
        DevicePtrMut::from_host_mut(&mut count),
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));

    // A boolean mask dtype is outside the registered pairing.
    assert_not_implemented(handle.masked_select(
        &input_desc,
        DevicePtr::from_host(&input),
        &tensor_nd(DType::Bool, &[2, 3, 4]),
        DevicePtr::from_host(&mask),
        DevicePtrMut::from_host_mut(&mut output),
        DevicePtrMut::from_host_mut(&mut count),
        Algo::DEFAULT,
    ));
}

#[test]
fn index_put_requires_exact_dtypes_and_no_broadcast() {
    let handle = Handle::new();
    let index = vec![0i64; 3];
    let values = vec![f16::ZERO; 15];
    let input = vec![f16::ZERO; 20];
    let mut output = vec![f16::ZERO; 20];

    let index_desc = tensor_nd(DType::I64, &[3]);
    let values_desc = tensor_nd(DType::F16, &[3, 5]);
    let input_desc = tensor_nd(DType::F16, &[4, 5]);
    let output_desc = tensor_nd(DType::F16, &[4, 5]);

    handle
        .index_put(
            false,
            &[&index_desc],
            &[DevicePtr::from_host(&index)],
            &values_desc,
            DevicePtr::from_host(&values),
            &input_desc,
            DevicePtr::from_host(&input),
            &output_desc,
            DevicePtrMut::from_host_mut(&mut output),
            Algo::DEFAULT,
        )
        .unwrap();
    handle.synchronize().unwrap();

    // A value axis of 1 against a longer result axis needs broadcasting.
    let narrow_values_desc = tensor_nd(DType::F16, &[1, 5]);
    assert_not_implemented(handle.index_put(
        false,
        &[&index_desc],
        &[DevicePtr::from_host(&index)],
        &narrow_values_desc,
        DevicePtr::from_host(&values),
        &input_desc,
        DevicePtr::from_host(&input),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    ));

    // Boolean index tensors take the mask path, which has no variant.
    let mask_index = vec![false; 3];
    let mask_index_desc = tensor_nd(DType::Bool, &[3]);
    assert_not_implemented(handle.index_put(
        false,
        &[&mask_index_desc],
        &[DevicePtr::from_host(&mask_index)],
        &values_desc,
        DevicePtr::from_host(&values),
        &input_desc,
        DevicePtr::from_host(&input),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    ));

    // A value axis that matches neither the result axis nor 1.
    let bad_values_desc = tensor_nd(DType::F16, &[3, 4]);
    let res = handle.index_put(
        false,
        &[&index_desc],
        &[DevicePtr::from_host(&index)],
        &bad_values_desc,
        DevicePtr::from_host(&values),
        &input_desc,
        DevicePtr::from_host(&input),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));

    // Index tensors of unequal lengths broadcast against each other.
    let short_index = vec![0i64; 1];
    let short_index_desc = tensor_nd(DType::I64, &[1]);
    let flat_values_desc = tensor_nd(DType::F16, &[3]);
    assert_not_implemented(handle.index_put(
        false,
        &[&index_desc, &short_index_desc],
        &[DevicePtr::from_host(&index), DevicePtr::from_host(&short_index)],
        &flat_values_desc,
        DevicePtr::from_host(&values),
        &input_desc,
        DevicePtr::from_host(&input),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    ));
}

#[test]
fn scatter_out_checks_ranks_and_axis() {
    let handle = Handle::new();
    let input = vec![0f32; 12];
    let index = vec![0i32; 12];
    let mut output = vec![0f32; 12];
    let input_desc = tensor_nd(DType::F32, &[3, 4]);
    let index_desc = tensor_nd(DType::I32, &[3, 4]);
    let output_desc = tensor_nd(DType::F32, &[3, 4]);

    for axis in [0, 1] {
        handle
            .scatter_out(
                axis,
                1.0,
                ScatterInput::Array,
                ScatterReduction::Add,
                &input_desc,
                DevicePtr::from_host(&input),
                &index_desc,
                DevicePtr::from_host(&index),
                &output_desc,
                DevicePtrMut::from_host_mut(&mut output),
                Algo::DEFAULT,
            )
            .unwrap();
    }
    handle.synchronize().unwrap();

    let res = handle.scatter_out(
        2,
        1.0,
        ScatterInput::Array,
        ScatterReduction::None,
        &input_desc,
        DevicePtr::from_host(&input),
        &index_desc,
        DevicePtr::from_host(&index),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));

    let flat_index_desc = tensor_nd(DType::I32, &[12]);
    let res = handle.scatter_out(
        0,
        1.0,
        ScatterInput::Array,
        ScatterReduction::None,
        &input_desc,
        DevicePtr::from_host(&input),
        &flat_index_desc,
        DevicePtr::from_host(&index),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    );
    assert!(matches!(res, Err(Error::BadParam(_))));

    let half_input_desc = tensor_nd(DType::F16, &[3, 4]);
    let half_input = vec![f16::ZERO; 12];
    assert_not_implemented(handle.scatter_out(
        0,
        1.0,
        ScatterInput::Scalar,
        ScatterReduction::Multiply,
        &half_input_desc,
        DevicePtr::from_host(&half_input),
        &index_desc,
        DevicePtr::from_host(&index),
        &output_desc,
        DevicePtrMut::from_host_mut(&mut output),
        Algo::DEFAULT,
    ));
}

#[test]
fn scatter_nd_add_covers_its_dtype_table() {
    let handle = Handle::new();
    let index = vec![0i32; 6];
    let index_desc = tensor_nd(DType::I32, &[3, 2]);

    fn run<T: oxidnn_core::WithDType>(
        handle: &Handle,
        index_desc: &TensorDescriptor,
        index: &[i32],
        zero: T,
    ) -> Result<(), Error> {
        let x = vec![zero; 20];
        let updates = vec![zero; 3];
        let mut out = vec![zero; 20];
        let x_desc = tensor_nd(T::DTYPE, &[4, 5]);
        let updates_desc = tensor_nd(T::DTYPE, &[3]);
        let out_desc = tensor_nd(T::DTYPE, &[4, 5]);
        handle.scatter_nd_add(
            &x_desc,
            DevicePtr::from_host(&x),
            index_desc,
            DevicePtr::from_host(index),
            &updates_desc,
            DevicePtr::from_host(&updates),
            &out_desc,
            DevicePtrMut::from_host_mut(&mut out),
            Algo::DEFAULT,
        )
    }

    run(&handle, &index_desc, &index, 0f32).unwrap();
    run(&handle, &index_desc, &index, f16::ZERO).unwrap();
    run(&handle, &index_desc, &index, 0i32).unwrap();
    run(&handle, &index_desc, &index, 0f64).unwrap();
    run(&handle, &index_desc, &index, 0i64).unwrap();
    assert_not_implemented(run(&handle, &index_desc, &index, 0u8));
    handle.synchronize().unwrap();
}

#[test]
fn unique_and_logical_not_gate_on_dtype() {
    let handle = Handle::new();

    let x = vec![0i64; 16];
    let mut y = vec![0i64; 16];
    let mut inverse = vec![0i64; 16];
    let mut counts = vec![0i64; 16];
    let mut out_size = vec![0i64; 1];
    let x_desc = tensor_nd(DType::I64, &[4, 4]);

    handle
        .unique(
            true,
            true,
            false,
            &x_desc,
            DevicePtr::from_host(&x),
            DevicePtrMut::from_host_mut(&mut y),
            DevicePtrMut::from_host_mut(&mut inverse),
            DevicePtrMut::from_host_mut(&mut counts),
            DevicePtrMut::from_host_mut(&mut out_size),
            Algo::DEFAULT,
        )
        .unwrap();

    let xf = vec![0f32; 16];
    let mut yf = vec![0f32; 16];
    let xf_desc = tensor_nd(DType::F32, &[4, 4]);
    assert_not_implemented(handle.unique(
        true,
        false,
        false,
        &xf_desc,
        DevicePtr::from_host(&xf),
        DevicePtrMut::from_host_mut(&mut yf),
        DevicePtrMut::null(),
        DevicePtrMut::null(),
        DevicePtrMut::from_host_mut(&mut out_size),
        Algo::DEFAULT,
    ));

    let a = vec![false; 12];
    let mut c = vec![false; 12];
    let a_desc = tensor_nd(DType::Bool, &[3, 4]);
    handle
        .logical_not(
            &a_desc,
            DevicePtr::from_host(&a),
            &a_desc,
            DevicePtrMut::from_host_mut(&mut c),
            Algo::DEFAULT,
        )
        .unwrap();

    let au8 = vec![0u8; 12];
    let mut cu8 = vec![0u8; 12];
    let u8_desc = tensor_nd(DType::U8, &[3, 4]);
    assert_not_implemented(handle.logical_not(
        &u8_desc,
        DevicePtr::from_host(&au8),
        &u8_desc,
        DevicePtrMut::from_host_mut(&mut cu8),
        Algo::DEFAULT,
    ));
    handle.synchronize().unwrap();
}
